use serde::{Deserialize, Serialize};

/// A named skill paired with a completion percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kpi {
    pub name: String,
    pub percentage: u8,
}

impl Kpi {
    /// Build a KPI, clamping the percentage to `0..=100`.
    pub fn new(name: impl Into<String>, percentage: u32) -> Self {
        Self {
            name: name.into(),
            percentage: percentage.min(100) as u8,
        }
    }
}

/// A named link to a deployed project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub link: String,
}

impl Project {
    pub fn new(name: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            link: link.into(),
        }
    }

    /// The parsed link, if it is an `http` or `https` URL.
    pub fn url(&self) -> Option<url::Url> {
        let url = url::Url::parse(self.link.trim()).ok()?;
        match url.scheme() {
            "http" | "https" => Some(url),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kpi_percentage_is_clamped() {
        assert_eq!(Kpi::new("Rust", 250).percentage, 100);
        assert_eq!(Kpi::new("Go", 42).percentage, 42);
    }

    #[test]
    fn only_web_links_are_openable() {
        assert!(Project::new("a", "https://mgeetech.com").url().is_some());
        assert!(Project::new("b", " http://example.org/x ").url().is_some());
        assert!(Project::new("c", "file:///etc/passwd").url().is_none());
        assert!(Project::new("d", "javascript:alert(1)").url().is_none());
        assert!(Project::new("e", "not a url").url().is_none());
    }
}
