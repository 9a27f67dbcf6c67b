use std::collections::BTreeSet;

/// Urls marked for a bulk action. View-local: it is never pruned when the
/// list changes underneath it, only cleared or replaced wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    urls: BTreeSet<String>,
}

impl SelectionSet {
    pub fn toggle(&mut self, url: &str, checked: bool) {
        if checked {
            self.urls.insert(url.to_string());
        } else {
            self.urls.remove(url);
        }
    }

    pub fn clear(&mut self) {
        self.urls.clear();
    }

    pub fn select_all<'a>(&mut self, urls: impl IntoIterator<Item = &'a str>) {
        self.urls = urls.into_iter().map(str::to_string).collect();
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }
}
