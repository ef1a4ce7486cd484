#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagName(pub String);

impl TagName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
