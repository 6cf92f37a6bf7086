//! Submission rendering and validation
//!
//! Produces the canonical legacy markdown for a document and checks that a
//! document is complete enough to be submitted.

use crate::error::SubmissionError;
use crate::model::{Phase, PhaseContent, SparkDocument};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Write as _;

static VALID_HANDLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9-]+$").expect("valid handle regex"));

/// Blank legacy (three-phase) template
pub const LEGACY_TEMPLATE: &str = r#"# ⚡ Spark: [Name Your Spark]

---

## 🧠 Phase 1: The Intuition (!HUNCH)
*Status: [Active]* *Scout: @YourGitHubHandle*

### The Observation
> Use your intuition here. What is missing? What feels "off"?

* **The Gap:** (Describe the gap)
* **The "Why":** (Explain why this matters)

---

## 🎨 Phase 2: The Imagination (!SHAPE)
*Status: [Pending]* *Designer: @Handle*

* **The Novel Core:** (Describe the 10% delta)
* **The Blueprint:** (Describe the unique design)
* **The Interface:** (How does this snap into the ecosystem?)
* **Prior Art:** (Why existing solutions don't work)

---

## 🛠️ Phase 3: The Logic (!BUILD)
*Status: [In-Progress]* *Builder: @Handle*

* **Technical Implementation:** (Code, schemas, or technical specs)
* **Clutch Power Test:** (How was this verified?)
* **Dependencies:** (What other Sparks or libraries does this need?)

---

## 📊 Contribution Log (CS Tracker)

| Phase | Contributor | Action | Reward |
| :--- | :--- | :--- | :--- |
"#;

/// Blank enhanced (numbered-section) template
pub const ENHANCED_TEMPLATE: &str = r#"---
id: spark_<unique_id>
title: "<Clear, concise spark title>"
domain: "<research | engineering | policy | education | product | other>"
spark_type: "<hypothesis | reframing | contradiction | system_design | constraint | exploration>"
maturity_level: "<seed | structured | modeled | validated | implemented>"
status: "<draft | under_review | iterating | accepted | archived>"
core_claim: "<One-sentence central claim or shift>"
problem_statement: "<What gap or inefficiency does this address?>"
risks:
  - "<Technical risk>"
  - "<Adoption risk>"
---

# 1. Spark Narrative
<!-- Describe the idea and the shift in thinking. -->

---

# 2. Hypothesis Formalization
**Hypothesis Statement**
> "<Clear measurable hypothesis>"

**Null Hypothesis**
> "<What would prove this wrong?>"

---

# 3. Simulation / Modeling Plan
## Model Type
- <Data replay / mathematical model / agent-based simulation / prototype / other>

## Inputs
- <Data or parameters required>

## Expected Outputs
- <What results will be generated?>

---

# 4. Evaluation Strategy
- Measurement method:
- Data source:
- Comparison baseline:

---

# 5. Feedback & Critique
## Internal Critique
- Hidden assumptions:
- Weaknesses:

---

# 6. Results (When Available)
- Observed outcomes:

---

# 7. Revision Notes
- What changed?

---

# 8. Next Actions
- [ ] Run simulation
- [ ] Peer review

---

# 9. Community Proposals
<!-- Non-owner contributors propose improvements to sections here. -->
"#;

fn default_status(phase: Phase) -> &'static str {
    match phase {
        Phase::Spark => "Active",
        Phase::Design => "Pending",
        Phase::Logic => "In-Progress",
    }
}

/// Render a document as canonical legacy markdown
///
/// Every field is written as a bold inline bullet, so parsing the output
/// yields the same single-line field values.
#[must_use]
pub fn render_legacy(doc: &SparkDocument) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# ⚡ Spark: {}\n\n---\n", doc.name);

    for phase in Phase::ALL {
        let role = phase.role();
        let handle = doc
            .handle(role)
            .map_or_else(|| "(unclaimed)".to_string(), |h| format!("@{h}"));
        let _ = writeln!(out, "## {}", phase.heading());
        let _ = writeln!(
            out,
            "*Status: [{}]* *{}: {}*\n",
            default_status(phase),
            role.title(),
            handle
        );

        let content = doc
            .phase(phase)
            .cloned()
            .unwrap_or_else(|| PhaseContent::empty(phase));
        for (label, value) in content.fields() {
            let value = value.trim();
            if value.is_empty() {
                let _ = writeln!(out, "* **{label}:**");
            } else {
                let _ = writeln!(out, "* **{label}:** {value}");
            }
        }
        out.push_str("\n---\n\n");
    }

    out.push_str("## 📊 Contribution Log (CS Tracker)\n\n");
    out.push_str("| Phase | Contributor | Action | Status |\n");
    out.push_str("| :--- | :--- | :--- | :--- |\n");
    for phase in Phase::ALL {
        let Some(handle) = doc.handle(phase.role()) else {
            continue;
        };
        let state = if doc.is_phase_stable(phase) {
            "Stable"
        } else {
            "Incomplete"
        };
        let _ = writeln!(
            out,
            "| {} | @{} | {} | {} |",
            phase.label(),
            handle,
            phase.tag(),
            state
        );
    }

    out
}

/// Check a document before submission
///
/// Requires a name, a well-formed handle for every role, and every sub-field
/// of every phase. All problems are reported, not just the first.
pub fn validate_submission(doc: &SparkDocument) -> Result<(), Vec<SubmissionError>> {
    let mut errors = Vec::new();

    if doc.name.trim().is_empty() {
        errors.push(SubmissionError::MissingName);
    }

    for phase in Phase::ALL {
        let role = phase.role();
        match doc.handle(role) {
            None => errors.push(SubmissionError::MissingHandle { phase, role }),
            Some(handle) if !VALID_HANDLE.is_match(handle) => {
                errors.push(SubmissionError::InvalidHandle {
                    role,
                    handle: handle.to_string(),
                });
            }
            Some(_) => {}
        }

        let content = doc
            .phase(phase)
            .cloned()
            .unwrap_or_else(|| PhaseContent::empty(phase));
        let missing: Vec<&'static str> = content
            .fields()
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(label, _)| label)
            .collect();
        if !missing.is_empty() {
            errors.push(SubmissionError::incomplete(phase, missing));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentFormat, Role};
    use crate::parser::SparkParser;
    use std::collections::BTreeMap;

    fn bare(name: &str) -> SparkDocument {
        SparkDocument {
            id: String::new(),
            name: name.to_string(),
            format: DocumentFormat::Legacy,
            phases: BTreeMap::new(),
            sections: BTreeMap::new(),
            contributors: BTreeMap::new(),
            source: String::new(),
        }
    }

    #[test]
    fn legacy_template_parses_to_three_phases() {
        let doc = SparkParser::new().parse(LEGACY_TEMPLATE);
        assert_eq!(doc.name, "[Name Your Spark]");
        assert_eq!(doc.phases.len(), 3);
        assert_eq!(doc.handle(Role::Scout), Some("YourGitHubHandle"));
    }

    #[test]
    fn enhanced_template_is_enhanced() {
        let doc = SparkParser::new().parse(ENHANCED_TEMPLATE);
        assert_eq!(doc.format, DocumentFormat::Enhanced);
        assert_eq!(doc.sections.len(), 8);
    }

    #[test]
    fn unclaimed_roles_render_placeholder() {
        let text = render_legacy(&bare("Lonely"));
        assert!(text.contains("*Scout: (unclaimed)*"));
        assert!(text.starts_with("# ⚡ Spark: Lonely\n"));
    }

    #[test]
    fn empty_document_reports_every_problem() {
        let errors = validate_submission(&bare("  ")).unwrap_err();
        assert_eq!(errors[0], SubmissionError::MissingName);
        // one missing handle and one incomplete-fields error per phase
        assert_eq!(errors.len(), 7);
    }

    #[test]
    fn invalid_handle_is_reported() {
        let mut doc = bare("Named");
        doc.contributors.insert(Role::Scout, "bad_handle".to_string());
        let errors = validate_submission(&doc).unwrap_err();
        assert!(errors.contains(&SubmissionError::InvalidHandle {
            role: Role::Scout,
            handle: "bad_handle".to_string(),
        }));
    }
}
