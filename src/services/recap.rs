//! Meeting recap: decisions and owned actions

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    pub task: String,
    pub owner: String,
    pub due: String,
}

impl fmt::Display for ActionItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (owner: {}, due: {})", self.task, self.owner, self.due)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recap {
    pub decisions: Vec<String>,
    pub actions: Vec<ActionItem>,
}

impl Recap {
    /// Recap of the onboarding copy review
    pub fn sample() -> Self {
        Self {
            decisions: vec![
                "Adopt onboarding copy option B".to_string(),
                "Move Wed stand-up to async for trial".to_string(),
            ],
            actions: vec![
                ActionItem {
                    task: "Design team to update mockups".to_string(),
                    owner: "Aisha".to_string(),
                    due: "Thu".to_string(),
                },
                ActionItem {
                    task: "Ops to draft async stand-up template".to_string(),
                    owner: "Ben".to_string(),
                    due: "Fri".to_string(),
                },
            ],
        }
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec!["Decisions".to_string()];
        lines.extend(self.decisions.iter().map(|d| format!("• {}", d)));
        lines.push("Actions".to_string());
        lines.extend(self.actions.iter().map(|a| format!("• {}", a)));
        lines
    }
}
