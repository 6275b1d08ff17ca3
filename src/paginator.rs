use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageError {
    ZeroPage,
    OutOfRange { requested: u32, page_count: u32 },
}

impl Display for PageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PageError::ZeroPage => write!(f, "Page has to be greater than 0"),
            PageError::OutOfRange { requested, page_count } => {
                write!(f, "Page {} has to be less than page_count ({})", requested, page_count)
            }
        }
    }
}

impl Error for PageError {}

/// Splits a listing into 1-based pages of `page_size` items.
pub struct Paginator<'a, T> {
    items: &'a [T],
    page_size: u32,
    page_count: u32,
}

impl<'a, T> Paginator<'a, T> {
    pub fn new(items: &'a [T], page_size: u32) -> Self {
        let page_size = page_size.max(1);
        let page_count = items.len().div_ceil(page_size as usize);

        Paginator {
            items,
            page_size,
            page_count: u32::try_from(page_count).unwrap_or(u32::MAX),
        }
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn page(&self, page: u32) -> Result<&'a [T], PageError> {
        match page {
            0 => return Err(PageError::ZeroPage),
            x if x > self.page_count => return Err(PageError::OutOfRange { requested: x, page_count: self.page_count }),
            _ => {}
        };

        let start = (page as usize - 1) * self.page_size as usize;
        let end = (start + self.page_size as usize).min(self.items.len());
        Ok(&self.items[start..end])
    }
}
