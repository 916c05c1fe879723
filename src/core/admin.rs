use crate::adapters::dom::Page;
use crate::config::AppConfig;
use crate::core::binder::{BindingConfig, ClickOutcome, DeleteBinder};
use crate::domain::model::{ElementHandle, ResourceId, ResourceKind};
use crate::domain::ports::{Browser, DeleteTransport};
use crate::utils::error::Result;
use std::collections::BTreeMap;

/// 每種資源綁定了幾個刪除按鈕
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindSummary {
    pub bound: BTreeMap<ResourceKind, usize>,
}

impl BindSummary {
    pub fn count(&self, kind: ResourceKind) -> usize {
        self.bound.get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.bound.values().sum()
    }
}

/// 管理頁面的組裝點：依設定為每種資源各綁定一次
pub struct AdminPage<T: DeleteTransport, B: Browser> {
    binder: DeleteBinder<T, B>,
    bindings: Vec<BindingConfig>,
}

impl<T: DeleteTransport, B: Browser> AdminPage<T, B> {
    pub fn new(transport: T, browser: B, config: &AppConfig) -> Self {
        Self {
            binder: DeleteBinder::with_policy(transport, browser, config.navigation.policy),
            bindings: config.bindings.clone(),
        }
    }

    pub fn bind(&mut self, page: &Page) -> Result<BindSummary> {
        let mut summary = BindSummary::default();
        for binding in &self.bindings {
            let count = self.binder.bind(page, binding.clone())?;
            *summary.bound.entry(binding.kind).or_insert(0) += count;
        }

        tracing::info!(
            "🔗 Bound {} delete trigger(s) ({} venue, {} artist)",
            summary.total(),
            summary.count(ResourceKind::Venue),
            summary.count(ResourceKind::Artist)
        );
        Ok(summary)
    }

    pub async fn click(&self, element: &ElementHandle) -> Result<ClickOutcome> {
        self.binder.click(element).await
    }

    /// 找出某種資源、指定 id 的刪除按鈕
    pub fn find_trigger(
        &self,
        page: &Page,
        kind: ResourceKind,
        id: ResourceId,
    ) -> Result<Option<ElementHandle>> {
        let Some(binding) = self.bindings.iter().find(|b| b.kind == kind) else {
            return Ok(None);
        };

        Ok(page
            .query_all(&binding.selector)?
            .into_iter()
            .find(|el| ResourceId::from_element(el).ok() == Some(id)))
    }

    pub fn binder(&self) -> &DeleteBinder<T, B> {
        &self.binder
    }
}
