/// A window into a result set, `page` is 1 based
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageQuery {
    pub page: usize,
    pub page_size: usize,
}

impl PageQuery {
    pub fn new(page: Option<usize>, page_size: Option<usize>, default_page_size: usize) -> Self {
        Self {
            page: page.filter(|p| *p > 0).unwrap_or(1),
            page_size: page_size.filter(|s| *s > 0).unwrap_or(default_page_size),
        }
    }

    pub fn skip(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

impl<T> Page<T> {
    /// Cuts the requested window out of an already ordered result set
    pub fn from_all(all: Vec<T>, query: PageQuery) -> Self {
        let total = all.len();
        let items = all
            .into_iter()
            .skip(query.skip())
            .take(query.page_size)
            .collect();
        Self {
            items,
            total,
            page: query.page,
            page_size: query.page_size,
        }
    }

    pub fn total_pages(&self) -> usize {
        if self.total == 0 {
            1
        } else {
            (self.total + self.page_size - 1) / self.page_size
        }
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_defaults() {
        let query = PageQuery::new(None, Some(0), 10);
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 10);
        assert_eq!(query.skip(), 0);
    }

    #[test]
    fn cuts_pages() {
        let all = (0..25).collect::<Vec<_>>();
        let page = Page::from_all(all.clone(), PageQuery::new(Some(3), Some(10), 10));
        assert_eq!(page.items, vec![20, 21, 22, 23, 24]);
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages(), 3);

        let beyond = Page::from_all(all, PageQuery::new(Some(4), Some(10), 10));
        assert!(beyond.items.is_empty());
        assert_eq!(Page::<i32>::from_all(vec![], PageQuery::new(None, None, 10)).total_pages(), 1);
    }
}
