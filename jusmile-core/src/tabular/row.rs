use std::sync::Arc;

/// One data record keyed by the header row.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    headers: Arc<[String]>,
    values: Vec<String>,
}

impl Row {
    /// Pads or truncates `values` to the header arity.
    pub(crate) fn new(headers: Arc<[String]>, mut values: Vec<String>) -> Self {
        values.resize(headers.len(), String::new());
        Self { headers, values }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Value of the column named exactly `header`.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.headers
            .iter()
            .position(|h| h == header)
            .map(|i| self.values[i].as_str())
    }

    /// Value of the first alias that names a column. Aliases are compared
    /// case-insensitively and tried in order.
    pub fn get_any(&self, aliases: &[&str]) -> Option<&str> {
        aliases.iter().find_map(|alias| {
            self.headers
                .iter()
                .position(|h| h.to_lowercase() == alias.to_lowercase())
                .map(|i| self.values[i].as_str())
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }
}
