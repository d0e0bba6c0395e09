//! Booking platform client.

use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::{BookingError, BookingResult};
use crate::ground::Ground;
use crate::release;
use crate::request::{ReservationRequest, DATE_FORMAT};

pub const DEFAULT_BASE_URL: &str = "http://reservation.ruichengyunqin.com";

const GRID_PATH: &str = "/api/blade-app/qywx/getOrderTimeConfigList";
const ORDER_PATH: &str = "/api/blade-app/qywx/saveOrder";
const SUCCESS_CODE: i64 = 200;

#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
enum RawStatus {
    Text(String),
    Number(i64),
}

fn status_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: RawStatus = serde::Deserialize::deserialize(deserializer)?;
    Ok(match raw {
        RawStatus::Text(s) => s,
        RawStatus::Number(n) => n.to_string(),
    })
}

#[derive(Debug, serde::Deserialize)]
pub struct TimeBlock {
    #[serde(deserialize_with = "status_as_string")]
    pub status: String,
}

#[derive(Debug, serde::Deserialize)]
#[allow(non_snake_case)]
pub struct DayConfig {
    pub timeBlockList: Vec<TimeBlock>,
}

#[derive(Debug, serde::Deserialize)]
#[allow(non_snake_case)]
pub struct ConfigListData {
    pub configList: Vec<DayConfig>,
}

#[derive(Debug, serde::Deserialize)]
pub struct ConfigListResponse {
    pub code: i64,
    pub success: bool,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub data: Option<ConfigListData>,
}

impl ConfigListResponse {
    pub fn parse(text: &str) -> BookingResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Raw statuses of the day `offset` days after the requested start date.
    pub fn into_day_statuses(self, offset: usize) -> BookingResult<Vec<String>> {
        if self.code != SUCCESS_CODE || !self.success {
            return Err(BookingError::Api {
                code: self.code,
                message: self.msg,
            });
        }

        let mut days = self.data.map(|d| d.configList).unwrap_or_default();
        let available = days.len();
        if offset >= available {
            return Err(BookingError::MissingDay { offset, available });
        }

        Ok(days
            .swap_remove(offset)
            .timeBlockList
            .into_iter()
            .map(|b| b.status)
            .collect())
    }
}

/// Reply to an order submission.
#[derive(Debug, serde::Deserialize)]
pub struct OrderReply {
    pub code: i64,
    pub success: bool,
    #[serde(default)]
    pub msg: String,
}

impl OrderReply {
    pub fn parse(text: &str) -> BookingResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// An HTTP 200 can still carry a refused order.
    pub fn into_result(self) -> BookingResult<()> {
        if self.code != SUCCESS_CODE || !self.success {
            return Err(BookingError::Api {
                code: self.code,
                message: self.msg,
            });
        }
        Ok(())
    }
}

/// What the reservation loop needs from the platform.
#[async_trait]
pub trait BookingService {
    /// Statuses for `target`, which is `offset` days after `today`.
    async fn day_statuses(
        &self,
        ground: &Ground,
        today: NaiveDate,
        target: NaiveDate,
        offset: usize,
    ) -> BookingResult<Vec<String>>;

    async fn submit(&self, request: &ReservationRequest) -> BookingResult<()>;
}

pub struct Pending;
pub struct Released;

pub struct Client<State = Pending> {
    base_url: String,
    user_id: String,
    http_client: reqwest::Client,
    state: PhantomData<State>,
}

impl Client {
    pub fn new(base_url: &str, user_id: &str) -> BookingResult<Client<Pending>> {
        let http_client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Client {
            base_url: base_url.trim_end_matches('/').to_string(),
            user_id: user_id.to_string(),
            http_client,
            state: PhantomData,
        })
    }
}

impl<State> Client<State> {
    pub fn grid_url(&self, ground_id: &str, start: NaiveDate, end: NaiveDate) -> String {
        format!(
            "{}{}?groundId={}&startDate={}&endDate={}&userid={}",
            self.base_url,
            GRID_PATH,
            ground_id,
            start.format(DATE_FORMAT),
            end.format(DATE_FORMAT),
            self.user_id
        )
    }

    pub fn order_url(&self) -> String {
        format!("{}{}?userid={}", self.base_url, ORDER_PATH, self.user_id)
    }
}

impl Client<Pending> {
    /// Blocks until the release hour; only a released client can book.
    pub async fn released(self, release_hour: u32) -> Client<Released> {
        release::wait_for_release(release_hour).await;
        self.assume_released()
    }

    pub fn assume_released(self) -> Client<Released> {
        Client {
            base_url: self.base_url,
            user_id: self.user_id,
            http_client: self.http_client,
            state: PhantomData,
        }
    }
}

#[async_trait]
impl BookingService for Client<Released> {
    async fn day_statuses(
        &self,
        ground: &Ground,
        today: NaiveDate,
        target: NaiveDate,
        offset: usize,
    ) -> BookingResult<Vec<String>> {
        let url = self.grid_url(&ground.id, today, target);
        debug!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await?
            .error_for_status()?;
        let text = response.text().await?;

        ConfigListResponse::parse(&text)?.into_day_statuses(offset)
    }

    async fn submit(&self, request: &ReservationRequest) -> BookingResult<()> {
        let url = self.order_url();
        debug!("POST {} {:?}", url, request.payload);

        let response = self
            .http_client
            .post(&url)
            .json(&request.payload)
            .send()
            .await?
            .error_for_status()?;
        let status = response.status();
        let body = response.text().await?;
        info!("Order for {} answered {}: {}", request.ground.label(), status, body);

        OrderReply::parse(&body)?.into_result()
    }
}
