//! GL config selection
//!
//! Among the configs a display offers for our template, prefer one that
//! supports transparency, then the one with the fewest multisample samples.

use glutin::config::{Config, GlConfig as _};

/// The config properties the picker compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigTraits {
    /// Whether the config can present a transparent window.
    pub supports_transparency: bool,
    /// Multisample count.
    pub num_samples: u8,
}

impl ConfigTraits {
    /// Read the traits of a glutin config.
    pub fn of(config: &Config) -> Self {
        Self {
            supports_transparency: config.supports_transparency().unwrap_or(false),
            num_samples: config.num_samples(),
        }
    }
}

/// Whether `candidate` should replace `current` as the best config so far.
pub fn prefers(current: ConfigTraits, candidate: ConfigTraits) -> bool {
    let gains_transparency = candidate.supports_transparency && !current.supports_transparency;
    gains_transparency || candidate.num_samples < current.num_samples
}

/// Fold [`prefers`] over `items`, returning the winner.
pub fn pick_best<T>(
    items: impl IntoIterator<Item = T>,
    traits: impl Fn(&T) -> ConfigTraits,
) -> Option<T> {
    items.into_iter().reduce(|best, candidate| {
        if prefers(traits(&best), traits(&candidate)) {
            candidate
        } else {
            best
        }
    })
}

/// Picker callback for `glutin_winit::DisplayBuilder::build`.
///
/// # Panics
///
/// If `configs` is empty. glutin requires the picker to return a config, and
/// its display backends report an empty match as an error from
/// `find_configs` before the picker runs.
pub fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    let config = pick_best(configs, ConfigTraits::of)
        .expect("display returned no configs matching the template");
    tracing::info!(
        samples = config.num_samples(),
        transparency = config.supports_transparency().unwrap_or(false),
        alpha = config.alpha_size(),
        "Selected GL config"
    );
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn traits(supports_transparency: bool, num_samples: u8) -> ConfigTraits {
        ConfigTraits {
            supports_transparency,
            num_samples,
        }
    }

    #[test]
    fn test_prefers_transparency() {
        assert!(prefers(traits(false, 0), traits(true, 4)));
        assert!(!prefers(traits(true, 0), traits(false, 4)));
    }

    #[test]
    fn test_prefers_fewer_samples() {
        assert!(prefers(traits(true, 4), traits(true, 0)));
        assert!(!prefers(traits(true, 0), traits(true, 0)));
        assert!(!prefers(traits(false, 0), traits(false, 8)));
    }

    #[test]
    fn test_pick_best() {
        let offered = vec![
            ("msaa8", traits(false, 8)),
            ("opaque", traits(false, 0)),
            ("transparent-msaa4", traits(true, 4)),
            ("transparent-msaa2", traits(true, 2)),
            ("transparent-msaa2-dup", traits(true, 2)),
        ];
        let (name, _) = pick_best(offered, |(_, t)| *t).unwrap();
        assert_eq!(name, "transparent-msaa2");
    }

    #[test]
    fn test_pick_best_empty() {
        let none: Vec<ConfigTraits> = Vec::new();
        assert!(pick_best(none, |t| *t).is_none());
    }
}
