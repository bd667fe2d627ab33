pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod fibonacci;
pub mod fvg;
pub mod rsi;
pub mod session;
pub mod snapshot;
pub mod volume_profile;

pub use atr::atr_series;
pub use bollinger::{bollinger, BollingerBands};
pub use ema::ema_series;
pub use fibonacci::{fib_levels, FibLevels};
pub use fvg::{gaps, FairValueGap, GapKind};
pub use rsi::rsi_series;
pub use session::{current_session, session_at, SessionWindow};
pub use snapshot::{IndicatorConfig, IndicatorSnapshot};
pub use volume_profile::point_of_control;
