//! The board's indicator library: all eight calculators over one series.

use tracing::debug;

use super::indicator::{Indicator, IndicatorSet};
use super::params::IndicatorParams;
use super::{Cci, Dmi, Macd, Momentum, ProjectionOscillator, Rsi, Stochastic, Volatility};
use crate::domain::PriceSeries;
use crate::error::PipelineError;

/// Computes every board indicator for a price series.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IndicatorLibrary {
    params: IndicatorParams,
}

impl IndicatorLibrary {
    /// Build a library after validating the parameters.
    pub fn new(params: IndicatorParams) -> Result<Self, PipelineError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &IndicatorParams {
        &self.params
    }

    /// The calculators in board column order.
    pub fn calculators(&self) -> Vec<Box<dyn Indicator>> {
        let p = &self.params;
        vec![
            Box::new(Rsi::new(p.rsi_window)),
            Box::new(Stochastic::new(p.stochastic_window)),
            Box::new(ProjectionOscillator::new(p.proj_osc_period)),
            Box::new(Volatility::new(p.volatility_window)),
            Box::new(Momentum::new(p.momentum_window)),
            Box::new(Macd::new(p.macd_fast, p.macd_slow, p.macd_signal)),
            Box::new(Dmi::new(p.dmi_window)),
            Box::new(Cci::new(p.cci_window)),
        ]
    }

    /// Longest warm-up across all calculators.
    pub fn max_lookback(&self) -> usize {
        self.calculators()
            .iter()
            .map(|c| c.lookback())
            .max()
            .unwrap_or(0)
    }

    /// Compute every indicator column for `series`.
    ///
    /// Fails only for an empty series; shorter-than-warm-up histories yield
    /// columns of `None`.
    pub fn compute(&self, series: &PriceSeries) -> Result<IndicatorSet, PipelineError> {
        if series.is_empty() {
            return Err(PipelineError::InsufficientHistory);
        }

        let bars = series.bars();
        let mut set = IndicatorSet::new(series.dates());
        for calculator in self.calculators() {
            let values = calculator.compute(bars);
            debug!(
                indicator = %calculator.kind(),
                lookback = calculator.lookback(),
                first_defined = ?values.iter().position(Option::is_some),
                "computed indicator column"
            );
            set.insert(calculator.kind(), values)?;
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IndicatorKind;
    use crate::indicators::make_bars;

    fn series(n: usize) -> PriceSeries {
        let closes: Vec<f64> = (0..n).map(|i| 100.0 + (i as f64 * 0.7).sin() * 3.0).collect();
        PriceSeries::new(make_bars(&closes)).unwrap()
    }

    #[test]
    fn computes_all_columns_aligned() {
        let set = IndicatorLibrary::default().compute(&series(50)).unwrap();
        assert_eq!(set.column_count(), 8);
        assert_eq!(set.len(), 50);
        for (kind, values) in set.iter() {
            assert_eq!(values.len(), 50, "{kind} misaligned");
        }
        let kinds: Vec<_> = set.iter().map(|(k, _)| k).collect();
        assert_eq!(kinds, IndicatorKind::ALL.to_vec());
    }

    #[test]
    fn warmups_match_lookbacks() {
        let library = IndicatorLibrary::default();
        let set = library.compute(&series(60)).unwrap();
        for calculator in library.calculators() {
            assert_eq!(
                set.first_defined(calculator.kind()),
                Some(calculator.lookback()),
                "{}",
                calculator.kind()
            );
        }
    }

    #[test]
    fn empty_series_is_insufficient_history() {
        let err = IndicatorLibrary::default()
            .compute(&PriceSeries::default())
            .unwrap_err();
        assert_eq!(err, PipelineError::InsufficientHistory);
    }

    #[test]
    fn single_bar_is_all_undefined() {
        let set = IndicatorLibrary::default().compute(&series(1)).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.iter().all(|(_, v)| v == [None]));
    }

    #[test]
    fn default_max_lookback_is_macd() {
        assert_eq!(IndicatorLibrary::default().max_lookback(), 33);
    }

    #[test]
    fn rejects_invalid_params() {
        let params = IndicatorParams {
            dmi_window: 0,
            ..IndicatorParams::default()
        };
        assert!(IndicatorLibrary::new(params).is_err());
    }
}
