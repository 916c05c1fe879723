use crate::adapters::dom::Page;
use crate::domain::model::{ElementHandle, ResourceId, ResourceKind};
use crate::domain::ports::{Browser, DeleteTransport};
use crate::utils::error::{AdminError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 一種資源的刪除按鈕綁定設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingConfig {
    pub kind: ResourceKind,
    pub selector: String,
    pub endpoint_prefix: String,
    pub redirect_path: String,
}

impl BindingConfig {
    pub fn for_kind(kind: ResourceKind) -> Self {
        Self {
            kind,
            selector: kind.default_selector().to_string(),
            endpoint_prefix: kind.collection_path().to_string(),
            redirect_path: kind.collection_path().to_string(),
        }
    }

    pub fn request_path(&self, id: ResourceId) -> String {
        format!("{}/{}", self.endpoint_prefix.trim_end_matches('/'), id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationPolicy {
    /// 只有 2xx/3xx 才導向
    #[default]
    OnSuccess,
    /// 不論狀態碼都導向（舊版頁面的行為）
    Always,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// 元素沒有綁定，不送任何請求
    Unbound,
    Deleted {
        kind: ResourceKind,
        id: ResourceId,
        status: u16,
        redirected_to: String,
    },
}

pub struct DeleteBinder<T: DeleteTransport, B: Browser> {
    transport: T,
    browser: B,
    policy: NavigationPolicy,
    configs: Vec<BindingConfig>,
    // (page id, element position) -> index into `configs`
    bindings: HashMap<(u64, usize), usize>,
}

impl<T: DeleteTransport, B: Browser> DeleteBinder<T, B> {
    pub fn new(transport: T, browser: B) -> Self {
        Self::with_policy(transport, browser, NavigationPolicy::default())
    }

    pub fn with_policy(transport: T, browser: B, policy: NavigationPolicy) -> Self {
        Self {
            transport,
            browser,
            policy,
            configs: Vec::new(),
            bindings: HashMap::new(),
        }
    }

    pub fn bound_count(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_bound(&self, element: &ElementHandle) -> bool {
        self.bindings.contains_key(&(element.page, element.position))
    }

    /// 掃描頁面一次，把符合 selector 的元素綁上刪除處理。回傳新綁定的數量。
    pub fn bind(&mut self, page: &Page, config: BindingConfig) -> Result<usize> {
        let elements = page.query_all(&config.selector)?;
        let config_index = self.configs.len();
        let mut bound = 0;

        for element in &elements {
            let key = (element.page, element.position);
            if let Some(existing) = self.bindings.get(&key) {
                tracing::warn!(
                    "Element <{}> at position {} is already bound as {} trigger, skipping",
                    element.tag,
                    element.position,
                    self.configs[*existing].kind
                );
                continue;
            }
            self.bindings.insert(key, config_index);
            bound += 1;
        }

        tracing::debug!(
            "Bound {} {} delete trigger(s) using '{}'",
            bound,
            config.kind,
            config.selector
        );
        self.configs.push(config);
        Ok(bound)
    }

    /// 模擬點擊。每次點擊送出一個請求，不做 debounce。
    pub async fn click(&self, element: &ElementHandle) -> Result<ClickOutcome> {
        let Some(config) = self
            .bindings
            .get(&(element.page, element.position))
            .map(|index| &self.configs[*index])
        else {
            tracing::debug!("Click on unbound <{}> ignored", element.tag);
            return Ok(ClickOutcome::Unbound);
        };

        let id = ResourceId::from_element(element).inspect_err(|e| self.report(e))?;
        let path = config.request_path(id);
        tracing::info!("🗑️  Deleting {} {} via DELETE {}", config.kind, id, path);

        let status = self
            .transport
            .delete(&path)
            .await
            .inspect_err(|e| self.report(e))?;

        let accepted = (200..400).contains(&status);
        if !accepted && self.policy == NavigationPolicy::OnSuccess {
            let err = AdminError::ServerRejected { status, path };
            self.report(&err);
            return Err(err);
        }
        if !accepted {
            tracing::warn!(
                "DELETE {} answered {}, navigating anyway (policy: always)",
                path,
                status
            );
        }

        self.browser.navigate(&config.redirect_path);
        Ok(ClickOutcome::Deleted {
            kind: config.kind,
            id,
            status,
            redirected_to: config.redirect_path.clone(),
        })
    }

    fn report(&self, err: &AdminError) {
        tracing::error!("❌ Delete failed: {}", err);
        self.browser.show_error(&err.user_friendly_message());
    }
}
