use crate::utils::error::{AdminError, Result};
use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// 刪除按鈕上存放資源 id 的屬性名稱
pub const ID_ATTRIBUTE: &str = "data_id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Venue,
    Artist,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 2] = [ResourceKind::Venue, ResourceKind::Artist];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Venue => "venue",
            ResourceKind::Artist => "artist",
        }
    }

    pub fn default_selector(&self) -> &'static str {
        match self {
            ResourceKind::Venue => ".delete_item_venue",
            ResourceKind::Artist => ".delete_item_artist",
        }
    }

    /// 列表頁與 DELETE 端點共用同一個前綴
    pub fn collection_path(&self) -> &'static str {
        match self {
            ResourceKind::Venue => "/venues",
            ResourceKind::Artist => "/artists",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "venue" | "venues" => Ok(ResourceKind::Venue),
            "artist" | "artists" => Ok(ResourceKind::Artist),
            other => Err(AdminError::InvalidConfigValueError {
                field: "kind".to_string(),
                value: other.to_string(),
                reason: "Expected 'venue' or 'artist'".to_string(),
            }),
        }
    }
}

/// 頁面元素的快照。解析後的 DOM 不能跨 await 持有，所以綁定只保存這份資料。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementHandle {
    /// 所屬頁面的識別碼
    pub page: u64,
    /// 在該頁面中的文件順序
    pub position: usize,
    pub tag: String,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
}

impl ElementHandle {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceId(u64);

impl ResourceId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// 讀取 `data_id`，在送出請求前先驗證
    pub fn from_element(element: &ElementHandle) -> Result<Self> {
        let raw = element
            .attr(ID_ATTRIBUTE)
            .ok_or_else(|| AdminError::AttributeMissing {
                attribute: ID_ATTRIBUTE.to_string(),
            })?;
        raw.parse()
    }
}

impl FromStr for ResourceId {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AdminError::PreconditionViolation {
                message: format!("'{}' is not a valid resource identifier", s),
            });
        }
        trimmed
            .parse::<u64>()
            .map(ResourceId)
            .map_err(|e| AdminError::PreconditionViolation {
                message: format!("'{}' is not a valid resource identifier: {}", s, e),
            })
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// UTC 時間點
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointInTime(DateTime<Utc>);

impl PointInTime {
    pub fn from_datetime(value: DateTime<Utc>) -> Self {
        Self(value)
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// 0 起算的月份 (一月 = 0)
    pub fn month0(&self) -> u32 {
        self.0.month0()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn second(&self) -> u32 {
        self.0.second()
    }

    pub fn millisecond(&self) -> u32 {
        self.0.timestamp_subsec_millis()
    }

    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
    }
}

impl fmt::Display for PointInTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}
