use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::AnalysisError;

/// Attached to every generated analysis.
pub const DISCLAIMER: &str = "This analysis is for informational purposes only.";

/// Ticker used when a request does not name one.
pub const DEFAULT_TICKER: &str = "UNKNOWN";

/// Uppercase a raw ticker, rejecting blank input.
pub fn normalize_ticker(raw: &str) -> Result<String, AnalysisError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AnalysisError::InvalidTicker(
            "ticker must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_uppercase())
}

/// Overall call derived from the averaged signal score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "UPPERCASE")]
pub enum Recommendation {
    Buy,
    Sell,
    Hold,
}

impl Recommendation {
    /// Scores above 0.3 buy, below -0.3 sell, anything between holds.
    pub fn from_score(avg_score: f64) -> Self {
        if avg_score > 0.3 {
            Recommendation::Buy
        } else if avg_score < -0.3 {
            Recommendation::Sell
        } else {
            Recommendation::Hold
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Buy => "BUY",
            Recommendation::Sell => "SELL",
            Recommendation::Hold => "HOLD",
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk bucket derived from volatility percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_volatility(volatility_percent: f64) -> Self {
        if volatility_percent > 5.0 {
            RiskLevel::High
        } else if volatility_percent > 2.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// Indicator snapshot embedded in an analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TechnicalIndicators {
    pub rsi: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub sma: f64,
    pub ema: f64,
}

/// A synthesized technical analysis for one ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AnalysisResult {
    #[serde(rename = "stock_ticker")]
    pub ticker: String,
    pub current_price: f64,
    pub price_change: f64,
    pub price_change_percent: f64,
    pub intraday_high: f64,
    pub intraday_low: f64,
    pub volume: u64,
    pub volatility_percent: f64,
    #[serde(rename = "technical_indicators")]
    pub indicators: TechnicalIndicators,
    pub support_level: f64,
    pub resistance_level: f64,
    pub mid_level: f64,
    pub recommendation: Recommendation,
    pub confidence_percent: f64,
    pub risk_level: RiskLevel,
    pub trading_signals: Vec<String>,
    pub analysis_timestamp: DateTime<Utc>,
    pub disclaimer: String,
}

/// A stored analysis and when it was stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CacheEntry {
    pub data: AnalysisResult,
    pub stored_at: DateTime<Utc>,
}

/// One row of the analyses listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AnalysisSummary {
    pub ticker: String,
    pub timestamp: DateTime<Utc>,
    pub recommendation: Recommendation,
    pub confidence: f64,
}

impl From<&CacheEntry> for AnalysisSummary {
    fn from(entry: &CacheEntry) -> Self {
        Self {
            ticker: entry.data.ticker.clone(),
            timestamp: entry.stored_at,
            recommendation: entry.data.recommendation,
            confidence: entry.data.confidence_percent,
        }
    }
}
