use crate::domain::model::ElementHandle;
use crate::utils::error::{AdminError, Result};
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_PAGE_ID: AtomicU64 = AtomicU64::new(1);

/// 伺服器渲染出來的頁面，解析一次後只讀。
/// 每次解析都會拿到新的 id，所以舊頁面的綁定不會套用到新頁面的元素上。
pub struct Page {
    id: u64,
    html: Html,
}

impl Page {
    pub fn parse(content: &str) -> Self {
        Self {
            id: NEXT_PAGE_ID.fetch_add(1, Ordering::Relaxed),
            html: Html::parse_document(content),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Ok(Self::parse(&content))
    }

    /// 依文件順序回傳所有符合 selector 的元素快照
    pub fn query_all(&self, selector: &str) -> Result<Vec<ElementHandle>> {
        let parsed = parse_selector(selector)?;
        let matched: HashSet<_> = self.html.select(&parsed).map(|el| el.id()).collect();
        if matched.is_empty() {
            return Ok(Vec::new());
        }

        let every = parse_selector("*")?;
        let handles = self
            .html
            .select(&every)
            .enumerate()
            .filter(|(_, el)| matched.contains(&el.id()))
            .map(|(position, el)| {
                let value = el.value();
                ElementHandle {
                    page: self.id,
                    position,
                    tag: value.name().to_string(),
                    classes: value.classes().map(str::to_string).collect(),
                    attributes: value
                        .attrs()
                        .map(|(name, val)| (name.to_string(), val.to_string()))
                        .collect(),
                }
            })
            .collect();

        Ok(handles)
    }

    pub fn query_first(&self, selector: &str) -> Result<Option<ElementHandle>> {
        Ok(self.query_all(selector)?.into_iter().next())
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| AdminError::InvalidSelector {
        selector: selector.to_string(),
        reason: format!("{:?}", e),
    })
}
