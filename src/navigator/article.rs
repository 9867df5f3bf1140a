use crate::navigator::form::Form;
use std::collections::HashMap;
use thiserror::Error;

pub const DEFAULT_ARTICLE: &str = "intro";
pub const THANKS_ARTICLE: &str = "thanks";

#[derive(Debug, Clone)]
pub enum ArticleContent {
    Static(String),
    Form(Form),
}

/// One addressable panel. `ordinal` is its position in declaration order and
/// decides the slide direction between two panels.
#[derive(Debug, Clone)]
pub struct Article {
    pub id: String,
    pub ordinal: usize,
    pub visible: bool,
    pub content: ArticleContent,
}

impl Article {
    pub fn form(&self) -> Option<&Form> {
        match &self.content {
            ArticleContent::Form(form) => Some(form),
            ArticleContent::Static(_) => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut Form> {
        match &mut self.content {
            ArticleContent::Form(form) => Some(form),
            ArticleContent::Static(_) => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArticleSetError {
    #[error("article set is empty")]
    Empty,
    #[error("duplicate article id '{0}'")]
    DuplicateId(String),
    #[error("missing required article '{0}'")]
    Missing(String),
}

/// Registry of every article on the page, in declaration order.
#[derive(Debug, Clone)]
pub struct ArticleSet {
    articles: Vec<Article>,
    index: HashMap<String, usize>,
    default_idx: usize,
    thanks_idx: usize,
}

impl ArticleSet {
    pub fn new(panels: Vec<(String, ArticleContent)>) -> Result<Self, ArticleSetError> {
        Self::with_ids(panels, DEFAULT_ARTICLE, THANKS_ARTICLE)
    }

    pub fn with_ids(
        panels: Vec<(String, ArticleContent)>,
        default_id: &str,
        thanks_id: &str,
    ) -> Result<Self, ArticleSetError> {
        if panels.is_empty() {
            return Err(ArticleSetError::Empty);
        }

        let mut articles = Vec::with_capacity(panels.len());
        let mut index = HashMap::with_capacity(panels.len());
        for (ordinal, (id, content)) in panels.into_iter().enumerate() {
            if index.insert(id.clone(), ordinal).is_some() {
                return Err(ArticleSetError::DuplicateId(id));
            }
            articles.push(Article {
                id,
                ordinal,
                visible: false,
                content,
            });
        }

        let default_idx = *index
            .get(default_id)
            .ok_or_else(|| ArticleSetError::Missing(default_id.to_string()))?;
        let thanks_idx = *index
            .get(thanks_id)
            .ok_or_else(|| ArticleSetError::Missing(thanks_id.to_string()))?;

        Ok(Self {
            articles,
            index,
            default_idx,
            thanks_idx,
        })
    }

    /// Maps an address or bare fragment onto an article. Anything up to the
    /// last `#` is dropped; an empty or unknown fragment lands on the default.
    pub fn resolve(&self, address: &str) -> usize {
        let fragment = match address.rsplit_once('#') {
            Some((_, fragment)) => fragment,
            None => address,
        };
        if fragment.is_empty() {
            return self.default_idx;
        }
        self.index.get(fragment).copied().unwrap_or(self.default_idx)
    }

    pub fn get(&self, idx: usize) -> &Article {
        &self.articles[idx]
    }

    pub fn get_mut(&mut self, idx: usize) -> &mut Article {
        &mut self.articles[idx]
    }

    pub fn find(&self, id: &str) -> Option<&Article> {
        self.index.get(id).map(|&idx| &self.articles[idx])
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn default_idx(&self) -> usize {
        self.default_idx
    }

    pub fn thanks_idx(&self) -> usize {
        self.thanks_idx
    }

    pub fn iter(&self) -> impl Iterator<Item = &Article> {
        self.articles.iter()
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panels(ids: &[&str]) -> Vec<(String, ArticleContent)> {
        ids.iter()
            .map(|id| (id.to_string(), ArticleContent::Static(String::new())))
            .collect()
    }

    #[test]
    fn resolve_falls_back_to_default() {
        let set = ArticleSet::new(panels(&["intro", "panelB", "thanks"])).unwrap();
        assert_eq!(set.resolve(""), 0);
        assert_eq!(set.resolve("#"), 0);
        assert_eq!(set.resolve("#nonexistent"), 0);
        assert_eq!(set.resolve("/feedback/"), 0);
    }

    #[test]
    fn resolve_takes_trailing_fragment() {
        let set = ArticleSet::new(panels(&["intro", "panelB", "thanks"])).unwrap();
        assert_eq!(set.resolve("#panelB"), 1);
        assert_eq!(set.resolve("http://example.com/feedback#panelB"), 1);
        assert_eq!(set.resolve("/a#b#thanks"), 2);
        assert_eq!(set.resolve("panelB"), 1);
    }

    #[test]
    fn construction_checks_ids() {
        assert_eq!(
            ArticleSet::new(Vec::new()).unwrap_err(),
            ArticleSetError::Empty
        );
        assert_eq!(
            ArticleSet::new(panels(&["intro", "intro", "thanks"])).unwrap_err(),
            ArticleSetError::DuplicateId("intro".to_string())
        );
        assert_eq!(
            ArticleSet::new(panels(&["intro", "other"])).unwrap_err(),
            ArticleSetError::Missing("thanks".to_string())
        );
    }

    #[test]
    fn ordinals_follow_declaration_order() {
        let set = ArticleSet::new(panels(&["thanks", "intro", "panelB"])).unwrap();
        let ordinals: Vec<usize> = set.iter().map(|a| a.ordinal).collect();
        assert_eq!(ordinals, vec![0, 1, 2]);
        assert_eq!(set.default_idx(), 1);
        assert_eq!(set.thanks_idx(), 0);
    }
}
