use crate::utils::error::Result;
use async_trait::async_trait;

/// 送出 DELETE 請求，回傳 HTTP 狀態碼
#[async_trait]
pub trait DeleteTransport: Send + Sync {
    async fn delete(&self, path: &str) -> Result<u16>;
}

/// 宿主頁面：導向與錯誤提示
pub trait Browser: Send + Sync {
    fn navigate(&self, location: &str);
    fn show_error(&self, message: &str);
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn timeout_seconds(&self) -> Option<u64>;
}
