//! Package registry - the ordered list of packages the translator consults.

/// Packages shipped with the app, in lookup order.
pub const DEFAULT_PACKAGES: [&str; 3] = [
    "travel_essentials",
    "business_essentials",
    "medical_care_essentials",
];

/// Fixed, ordered list of package names.
///
/// Order matters: when two packages map the same text, the later one wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRegistry {
    packages: Vec<String>,
}

impl PackageRegistry {
    /// Build a registry from names, dropping blanks and repeats (first occurrence kept).
    pub fn new<I, S>(packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list: Vec<String> = Vec::new();
        for name in packages {
            let name = name.into().trim().to_string();
            if !name.is_empty() && !list.contains(&name) {
                list.push(name);
            }
        }
        Self { packages: list }
    }

    pub fn list_packages(&self) -> &[String] {
        &self.packages
    }

    pub fn contains(&self, package: &str) -> bool {
        self.packages.iter().any(|p| p == package)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl Default for PackageRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_PACKAGES)
    }
}
