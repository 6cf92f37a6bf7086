//! Testing utilities for the Spark scribe workspace
//!
//! Shared document fixtures and ledger builders.

#![allow(missing_docs)]

use chrono::NaiveDate;
use serde_json::{json, Value};

/// Full three-phase document with sub-bullets, a heading-form novel core and
/// a contribution log
pub const FULL_LEGACY: &str = r#"# 🧩 Spark: GitHub Reputation Decay Algorithm

---

## 🧠 Phase 1: The Intuition (!HUNCH)

*Status: [Active]* *Scout: @vishravars*

### The Observation
> Contributors on GitHub accumulate reputation but lose momentum when inactive. There's no mechanism to decay stale contributions.

* **The Gap:** GitHub's contribution graph is static and does not reflect current relevance.
* **The "Why":** A developer who contributed 5 years ago shouldn't hold the same weight as someone shipping code today.

---

## 🎨 Phase 2: The Imagination (!SHAPE)

*Status: [Active]* *Designer: @designer-handle*

### The Novel Core (The 10% Delta)
* **The Blueprint:** Implement a decay function that:
  - Awards full CS for code merged in the last 6 months
  - Applies a logarithmic decay curve for older contributions
  - Resets on new merge

* **The Interface:**
  - Snap into GitHub API: Read contributor's commit history
  - Snap into the merit system: Recalculate CS on-demand

* **Prior Art:** GitHub Contributions API only counts commits. Existing reputation systems don't decay.

---

## 🛠️ Phase 3: The Logic (!BUILD)

*Status: [Active]* *Builder: @builder-handle*

### Technical Implementation
The decay algorithm runs in the backend:
- Uses exponential decay: `score = original_score * exp(-lambda * days_inactive)`
- Triggers on each PR merge

* **Clutch Power Test:**
  - Unit tests verify decay curve accuracy
  - Integration test: simulate a 2-year-old contributor

* **Dependencies:**
  - PyGithub library

---

## 📊 Contribution Log (CS Tracker)

| Phase | Contributor | Action | Reward |
| :--- | :--- | :--- | :--- |
| **Intuition** | @vishravars | Submitted Hunch | +5 CS |
| **Imagination** | @designer-handle | Designed Shape | +15 CS (+5 Echo) |
| **Logic** | @builder-handle | Merged Build | +25 CS (+10 Prototype) |
"#;

/// All three phases stable with distinct handles and a rich novel core
pub const GREEN_LEGACY: &str = r#"# 🧩 Spark: Neural Lego Bricks

## 🧠 Phase 1: The Intuition (!HUNCH)
*Status: [Active]* *Scout: @IntuitionIvan*

### The Observation
> Agents rebuild the same tool adapters from scratch for every project.

* **The Gap:** There is no shared socket format for tool adapters.
* **The "Why":** Every rebuild burns contributor time that should go to fresh ideas.

---

## 🎨 Phase 2: The Imagination (!SHAPE)
*Status: [Active]* *Designer: @CreativeClara*

* **The Novel Core:** A novel and unique adapter socket that closes the gap between tool authors and agent builders. The delta is a typed manifest that every brick declares up front, so that a runtime can verify compatibility before wiring anything together. Unlike plugin registries the manifest travels with the brick itself and is checked locally, which removes the central catalogue and lets small teams publish bricks without waiting for approval from anyone.
* **The Blueprint:** A manifest schema plus a loader that validates it.
* **The Interface:** Bricks snap into the agent runtime through the loader.
* **Prior Art:** Plugin registries need central approval and drift from the code.

---

## 🛠️ Phase 3: The Logic (!BUILD)
*Status: [Active]* *Builder: @DevDevon*

* **Technical Implementation:** A loader crate that parses manifests and rejects mismatches.
* **Clutch Power Test:** Load forty community bricks and confirm every mismatch is rejected.
* **Dependencies:** A manifest schema. Versioning is a trade-off against flexibility.
"#;

/// Only phase 1, with a scout handle
pub const SPARK_ONLY: &str = r#"# Spark: Quiet Hours

## 🧠 Phase 1: The Intuition (!HUNCH)
*Status: [Active]* *Scout: @IntuitionIvan*

* **The Gap:** Notifications arrive during focus time.
* **The "Why":** Interruptions cost deep work.
"#;

/// Phases 1 and 3 stable, phase 2 claimed but missing its interface
pub const DESIGN_GAP: &str = r#"# Spark: Half Built Bridge

## 🧠 Phase 1: The Intuition (!HUNCH)
*Status: [Active]* *Scout: @IntuitionIvan*

* **The Gap:** Two teams cannot share schemas.

## 🎨 Phase 2: The Imagination (!SHAPE)
*Status: [Pending]* *Designer: @CreativeClara*

* **The Blueprint:** A schema bridge.

## 🛠️ Phase 3: The Logic (!BUILD)
*Status: [Active]* *Builder: @DevDevon*

* **Technical Implementation:** A converter binary.
* **Clutch Power Test:** Round-trip every schema in the corpus.
"#;

/// Only phase 3, stable
pub const LOGIC_ONLY: &str = r#"# Spark: Orphan Build

## 🛠️ Phase 3: The Logic (!BUILD)
*Status: [Active]* *Builder: @DevDevon*

* **Technical Implementation:** A cron job.
* **Clutch Power Test:** It ran for a week.
"#;

/// Phase 1 present without any handle
pub const NO_HANDLES: &str = r#"# Spark: Anonymous Hunch

## 🧠 Phase 1: The Intuition (!HUNCH)
*Status: [Active]* *Scout: YourGitHubHandle*

* **The Gap:** Nobody signed this.
"#;

/// Enhanced document whose sections clear every length threshold
pub const ENHANCED_FULL: &str = r#"---
id: spark_tidal_cache
title: "Tidal Cache"
spark_type: hypothesis
---

# 1. Spark Narrative
Caches evict by recency, but community traffic arrives in predictable tides tied to release cycles.

---

# 2. Hypothesis Formalization
**Hypothesis Statement**
> "Tide-aware eviction raises hit rate by ten percent."

# 3. Simulation / Modeling Plan
## Model Type
- Replay one quarter of production access logs.

# 4. Evaluation Strategy
- Compare hit rate against LRU.
"#;

/// Enhanced document with a brief narrative and no hypothesis
pub const ENHANCED_THIN: &str = r#"---
title: Thin Idea
spark_type: exploration
---

# 1. Spark Narrative
Short.

# 3. Simulation / Modeling Plan
TBD
"#;

/// Calendar date shorthand
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Build ledger JSON from `(username, [(date, role, cs)])` entries
pub fn ledger_json(entries: &[(&str, &[(&str, &str, f64)])]) -> String {
    let ledger: Vec<Value> = entries
        .iter()
        .map(|(username, records)| {
            let contributions: Vec<Value> = records
                .iter()
                .map(|(date, role, cs)| json!({ "date": date, "role": role, "cs": cs }))
                .collect();
            json!({ "username": username, "contributions": contributions })
        })
        .collect();
    Value::Array(ledger).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_json_shape() {
        let json = ledger_json(&[("@a", &[("2026-01-01", "scout", 5.0)])]);
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["username"], "@a");
        assert_eq!(value[0]["contributions"][0]["cs"], 5.0);
    }
}
