use analysis_core::{
    AnalysisResult, RandomSource, Recommendation, RiskLevel, TechnicalIndicators, DISCLAIMER,
};
use chrono::Utc;

use crate::signals::{average_score, evaluate_signals};

/// Round to `places` decimals, exact halves going to the even neighbour.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

fn round4(value: f64) -> f64 {
    round_to(value, 4)
}

/// Synthesize a mock technical analysis for `ticker`.
///
/// Values are rounded as they are drawn and every derived field is computed
/// from the rounded values, so the signals, recommendation and risk level can
/// always be recomputed from the reported numbers. Draw order is fixed, which
/// makes the output reproducible for a seeded source.
pub fn generate(ticker: &str, rng: &mut dyn RandomSource) -> AnalysisResult {
    // Price
    let current_price = round2(rng.uniform(10.0, 100.0));
    let price_change = round2(rng.uniform(-5.0, 5.0));
    let price_change_percent = round2(price_change / current_price * 100.0);

    // Indicators
    let rsi = round2(rng.uniform(20.0, 80.0));
    let macd = round4(rng.uniform(-2.0, 2.0));
    let macd_signal = round4(rng.uniform(-2.0, 2.0));
    let sma = round2(rng.uniform(current_price - 5.0, current_price + 5.0));
    let ema = round2(rng.uniform(current_price - 5.0, current_price + 5.0));

    // Levels
    let support_level = round2(current_price - rng.uniform(2.0, 5.0));
    let resistance_level = round2(current_price + rng.uniform(2.0, 5.0));

    let signals = evaluate_signals(rsi, macd, macd_signal, current_price, sma, ema);
    let avg_score = average_score(&signals);
    let confidence_percent = avg_score.abs() * 100.0;
    let recommendation = Recommendation::from_score(avg_score);

    let volatility_percent =
        round2((resistance_level - support_level) / current_price * 100.0);
    let risk_level = RiskLevel::from_volatility(volatility_percent);

    let intraday_high = round2(current_price + rng.uniform(1.0, 3.0));
    let intraday_low = round2(current_price - rng.uniform(1.0, 3.0));
    let volume = rng.integer(1_000_000, 10_000_000);

    let ticker = ticker.to_uppercase();
    tracing::debug!(
        ticker = %ticker,
        avg_score,
        recommendation = %recommendation,
        "generated mock analysis"
    );

    AnalysisResult {
        ticker,
        current_price,
        price_change,
        price_change_percent,
        intraday_high,
        intraday_low,
        volume,
        volatility_percent,
        indicators: TechnicalIndicators {
            rsi,
            macd,
            macd_signal,
            sma,
            ema,
        },
        support_level,
        resistance_level,
        mid_level: round2((support_level + resistance_level) / 2.0),
        recommendation,
        confidence_percent,
        risk_level,
        trading_signals: signals.into_iter().map(|s| s.message).collect(),
        analysis_timestamp: Utc::now(),
        disclaimer: DISCLAIMER.to_string(),
    }
}
