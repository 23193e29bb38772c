use super::FileFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Affix {
    Prefix,
    Postfix,
}

/// Case-insensitive prefix or postfix match. An empty needle matches every name.
pub struct AffixFilter {
    affix: Affix,
    needle: String,
}

impl AffixFilter {
    pub fn new(affix: Affix, text: &str) -> Self {
        Self {
            affix,
            needle: text.to_lowercase(),
        }
    }

    pub fn prefix(text: &str) -> Self {
        Self::new(Affix::Prefix, text)
    }

    pub fn postfix(text: &str) -> Self {
        Self::new(Affix::Postfix, text)
    }
}

impl FileFilter for AffixFilter {
    fn matches(&self, base_name: &str) -> bool {
        if self.needle.is_empty() {
            return true;
        }

        let name = base_name.to_lowercase();
        match self.affix {
            Affix::Prefix => name.starts_with(&self.needle),
            Affix::Postfix => name.ends_with(&self.needle),
        }
    }
}
