use crate::domain::tag::TagName;

/// The three changelog buckets, filled in commit-enumeration order.
#[derive(Debug, Default)]
pub struct Changelog {
    updates: Vec<String>,
    additions: Vec<String>,
    fixes: Vec<String>,
}

impl Changelog {
    pub fn push_update(&mut self, entry: &str) {
        self.updates.push(entry.trim().to_string());
    }

    pub fn push_addition(&mut self, entry: &str) {
        self.additions.push(entry.trim().to_string());
    }

    pub fn push_fix(&mut self, entry: &str) {
        self.fixes.push(entry.trim().to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty() && self.additions.is_empty() && self.fixes.is_empty()
    }

    /// Assemble the final document. Update entries come before the bulleted
    /// sections; bucket order within a section is insertion order.
    pub fn render(&self, tag: &TagName, annotation_body: &str) -> String {
        let mut out = format!("# {} Changelog\n\n", tag.as_str());

        let annotation = annotation_body.trim();
        if !annotation.is_empty() {
            out.push_str(annotation);
            out.push('\n');
        }

        for entry in &self.updates {
            out.push_str(entry);
            out.push('\n');
        }
        if !self.updates.is_empty() {
            out.push('\n');
        }

        if !self.fixes.is_empty() {
            out.push_str("## Bugfixes\n\n");
            for entry in &self.fixes {
                out.push_str(" * ");
                out.push_str(entry);
                out.push('\n');
            }
            out.push('\n');
        }

        if !self.additions.is_empty() {
            out.push_str("## Additions\n\n");
            for entry in &self.additions {
                out.push_str(" * ");
                out.push_str(entry);
                out.push('\n');
            }
            out.push('\n');
        }

        if self.is_empty() {
            out.push_str("This was an uneventful development cycle.\n");
        }

        out
    }
}
