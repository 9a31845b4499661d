//! Heuristic indicator signals.
//!
//! Each rule compares one indicator against a threshold or against price and
//! yields a human-readable message with a score of -1, 0 or +1.

/// One evaluated signal
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub message: String,
    pub score: i32,
}

impl Signal {
    fn new(message: String, score: i32) -> Self {
        Self { message, score }
    }
}

/// Overbought above 70 (sell), oversold below 30 (buy), neutral otherwise.
pub fn rsi_signal(rsi: f64) -> Signal {
    if rsi > 70.0 {
        Signal::new(format!("RSI Overbought ({rsi:.2} > 70) - SELL Signal"), -1)
    } else if rsi < 30.0 {
        Signal::new(format!("RSI Oversold ({rsi:.2} < 30) - BUY Signal"), 1)
    } else {
        Signal::new(format!("RSI Neutral ({rsi:.2})"), 0)
    }
}

/// MACD strictly above its signal line buys; equal or below sells.
pub fn macd_signal(macd: f64, signal_line: f64) -> Signal {
    if macd > signal_line {
        Signal::new("MACD above Signal - BUY Signal".to_string(), 1)
    } else {
        Signal::new("MACD below Signal - SELL Signal".to_string(), -1)
    }
}

/// Price strictly above the average buys; equal or below sells.
pub fn moving_average_signal(label: &str, price: f64, average: f64) -> Signal {
    if price > average {
        Signal::new(
            format!("Price above {label} ({price:.2} > {average:.2}) - BUY Signal"),
            1,
        )
    } else {
        Signal::new(
            format!("Price below {label} ({price:.2} < {average:.2}) - SELL Signal"),
            -1,
        )
    }
}

/// Evaluate all four rules in reporting order: RSI, MACD, SMA, EMA.
pub fn evaluate_signals(
    rsi: f64,
    macd: f64,
    macd_signal_line: f64,
    price: f64,
    sma: f64,
    ema: f64,
) -> Vec<Signal> {
    vec![
        rsi_signal(rsi),
        macd_signal(macd, macd_signal_line),
        moving_average_signal("SMA", price, sma),
        moving_average_signal("EMA", price, ema),
    ]
}

/// Mean score, or 0 when there are no signals.
pub fn average_score(signals: &[Signal]) -> f64 {
    if signals.is_empty() {
        return 0.0;
    }
    let total: i32 = signals.iter().map(|s| s.score).sum();
    f64::from(total) / signals.len() as f64
}
