#[cfg(test)]
mod tests {
    use super::super::generator::*;
    use super::super::signals::*;
    use analysis_core::{RandomSource, Recommendation, RiskLevel, RngSource, DISCLAIMER};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::VecDeque;

    /// Replays fixed fractions of each requested interval.
    struct ScriptedSource {
        fractions: VecDeque<f64>,
    }

    impl ScriptedSource {
        fn new(fractions: &[f64]) -> Self {
            Self {
                fractions: fractions.iter().copied().collect(),
            }
        }

        fn next(&mut self) -> f64 {
            self.fractions.pop_front().unwrap_or(0.5)
        }
    }

    impl RandomSource for ScriptedSource {
        fn uniform(&mut self, low: f64, high: f64) -> f64 {
            low + self.next() * (high - low)
        }

        fn integer(&mut self, low: u64, high: u64) -> u64 {
            low + (self.next() * (high - low) as f64) as u64
        }
    }

    fn seeded(seed: u64) -> RngSource<StdRng> {
        RngSource(StdRng::seed_from_u64(seed))
    }

    fn recompute_score(result: &analysis_core::AnalysisResult) -> f64 {
        let i = &result.indicators;
        let signals = evaluate_signals(
            i.rsi,
            i.macd,
            i.macd_signal,
            result.current_price,
            i.sma,
            i.ema,
        );
        average_score(&signals)
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(1.23456, 4), 1.2346);
        assert_eq!(round_to(-0.125, 1), -0.1);
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(3.5, 0), 4.0);
        assert_eq!(round_to(-2.5, 0), -2.0);
    }

    #[test]
    fn test_round_to_exact_ties_go_even() {
        // (50.00 + 60.25) / 2 is exactly 55.125
        assert_eq!(round_to((50.0 + 60.25) / 2.0, 2), 55.12);
        assert_eq!(round_to(0.375, 2), 0.38);
        assert_eq!(round_to(0.125, 2), 0.12);
    }

    #[test]
    fn test_ticker_is_uppercased() {
        for (i, ticker) in ["aapl", "Msft", "brk.b", "NVDA"].iter().enumerate() {
            let result = generate(ticker, &mut seeded(i as u64));
            assert_eq!(result.ticker, ticker.to_uppercase());
        }
    }

    #[test]
    fn test_same_seed_same_numbers() {
        let a = generate("AAPL", &mut seeded(99));
        let b = generate("AAPL", &mut seeded(99));
        assert_eq!(a.current_price, b.current_price);
        assert_eq!(a.indicators, b.indicators);
        assert_eq!(a.trading_signals, b.trading_signals);
        assert_eq!(a.volume, b.volume);
        assert_eq!(a.recommendation, b.recommendation);
    }

    #[test]
    fn test_invariants_hold_across_seeds() {
        for seed in 0..500 {
            let r = generate("TEST", &mut seeded(seed));

            assert!((10.0..=100.0).contains(&r.current_price));
            assert!((-5.0..=5.0).contains(&r.price_change));
            assert!((1_000_000..=10_000_000).contains(&r.volume));
            assert!((20.0..=80.0).contains(&r.indicators.rsi));
            assert!((-2.0..=2.0).contains(&r.indicators.macd));
            assert!((-2.0..=2.0).contains(&r.indicators.macd_signal));
            assert!(r.intraday_high > r.current_price);
            assert!(r.intraday_low < r.current_price);
            assert!(r.support_level < r.current_price);
            assert!(r.resistance_level > r.current_price);

            assert_eq!(
                r.mid_level,
                round_to((r.support_level + r.resistance_level) / 2.0, 2)
            );

            let avg = recompute_score(&r);
            assert_eq!(r.recommendation, Recommendation::from_score(avg));
            assert_eq!(r.confidence_percent, avg.abs() * 100.0);
            match r.recommendation {
                Recommendation::Buy => assert!(avg > 0.3),
                Recommendation::Sell => assert!(avg < -0.3),
                Recommendation::Hold => assert!((-0.3..=0.3).contains(&avg)),
            }

            assert_eq!(r.risk_level, RiskLevel::from_volatility(r.volatility_percent));
            assert_eq!(r.trading_signals.len(), 4);
            assert_eq!(r.disclaimer, DISCLAIMER);
        }
    }

    #[test]
    fn test_strong_buy_path() {
        // price 55, rsi 20 (oversold), macd 2 > signal -2, sma/ema at the low end
        let mut rng = ScriptedSource::new(&[0.5, 0.5, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0]);
        let r = generate("aapl", &mut rng);

        assert_eq!(r.current_price, 55.0);
        assert_eq!(r.price_change, 0.0);
        assert_eq!(r.indicators.rsi, 20.0);
        assert_eq!(r.indicators.macd, 2.0);
        assert_eq!(r.indicators.macd_signal, -2.0);
        assert_eq!(r.indicators.sma, 50.0);
        assert_eq!(r.indicators.ema, 50.0);
        assert_eq!(r.recommendation, Recommendation::Buy);
        assert_eq!(r.confidence_percent, 100.0);
        assert_eq!(
            r.trading_signals,
            vec![
                "RSI Oversold (20.00 < 30) - BUY Signal",
                "MACD above Signal - BUY Signal",
                "Price above SMA (55.00 > 50.00) - BUY Signal",
                "Price above EMA (55.00 > 50.00) - BUY Signal",
            ]
        );

        // support 50, resistance 60 → 10/55 = 18.18% volatility
        assert_eq!(r.support_level, 50.0);
        assert_eq!(r.resistance_level, 60.0);
        assert_eq!(r.mid_level, 55.0);
        assert_eq!(r.volatility_percent, 18.18);
        assert_eq!(r.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_macd_tie_counts_as_sell() {
        // rsi neutral, macd == signal, price above sma, price below ema → (0 -1 +1 -1)/4
        let mut rng = ScriptedSource::new(&[0.5, 0.5, 0.5, 0.5, 0.5, 0.0, 1.0]);
        let r = generate("TIE", &mut rng);

        assert_eq!(r.indicators.macd, r.indicators.macd_signal);
        assert_eq!(r.trading_signals[1], "MACD below Signal - SELL Signal");
        assert_eq!(r.confidence_percent, 25.0);
        assert_eq!(r.recommendation, Recommendation::Hold);
    }

    #[test]
    fn test_strong_sell_path() {
        // rsi 80 overbought, macd -2 < 2, sma/ema above price
        let mut rng = ScriptedSource::new(&[0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 1.0]);
        let r = generate("X", &mut rng);

        assert_eq!(r.current_price, 10.0);
        assert_eq!(r.price_change, -5.0);
        assert_eq!(r.price_change_percent, -50.0);
        assert_eq!(r.recommendation, Recommendation::Sell);
        assert_eq!(r.confidence_percent, 100.0);
        assert_eq!(r.trading_signals[0], "RSI Overbought (80.00 > 70) - SELL Signal");
    }

    #[test]
    fn test_risk_levels_from_levels() {
        // price 100, support and resistance offsets of 2 → 4% volatility
        let mut rng = ScriptedSource::new(&[1.0, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.0, 0.0]);
        let r = generate("MID", &mut rng);
        assert_eq!(r.volatility_percent, 4.0);
        assert_eq!(r.risk_level, RiskLevel::Medium);
    }
}
