#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UserLanguage {
    #[default]
    Nb,
    En,
}

impl UserLanguage {
    /// Picks the first language tag of an `Accept-Language` style value.
    /// Anything that is not English falls back to Norwegian.
    pub fn from_raw(raw: Option<&str>) -> Self {
        let candidate = raw
            .unwrap_or("nb")
            .split(',')
            .next()
            .unwrap_or("nb")
            .split(';')
            .next()
            .unwrap_or("nb")
            .split(['-', '_'])
            .next()
            .unwrap_or("nb")
            .trim()
            .to_lowercase();
        match candidate.as_str() {
            "en" => UserLanguage::En,
            _ => UserLanguage::Nb,
        }
    }

    /// Strict lookup for path parameters.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "nb" | "no" | "nn" => Some(UserLanguage::Nb),
            "en" => Some(UserLanguage::En),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserLanguage::Nb => "nb",
            UserLanguage::En => "en",
        }
    }
}
