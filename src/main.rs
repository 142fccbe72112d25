//! Water Surface entry point
//!
//! Natively this runs the simulation headless at a fixed step and prints the
//! final state. The browser build drives `platform::web::WaterSurface` instead.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::{Context, bail};
    use water_surface::consts::SIM_DT;
    use water_surface::sim::{RippleSource, SurfaceEvent};
    use water_surface::{Settings, Surface};

    /// Command-line options
    #[derive(Debug, Default)]
    pub struct RunArgs {
        pub seconds: Option<f32>,
        pub seed: Option<u64>,
        pub settings: Option<PathBuf>,
    }

    impl RunArgs {
        pub fn parse(args: impl IntoIterator<Item = String>) -> anyhow::Result<Self> {
            let mut out = Self::default();
            let mut args = args.into_iter();
            while let Some(arg) = args.next() {
                let mut value = |name: &str| {
                    args.next()
                        .with_context(|| format!("missing value for {name}"))
                };
                match arg.as_str() {
                    "--seconds" => {
                        let v = value("--seconds")?;
                        let seconds: f32 = v.parse().with_context(|| format!("invalid --seconds {v:?}"))?;
                        if !(seconds.is_finite() && seconds >= 0.0) {
                            bail!("--seconds must be a non-negative number");
                        }
                        out.seconds = Some(seconds);
                    }
                    "--seed" => {
                        let v = value("--seed")?;
                        out.seed = Some(v.parse().with_context(|| format!("invalid --seed {v:?}"))?);
                    }
                    "--settings" => out.settings = Some(PathBuf::from(value("--settings")?)),
                    other => bail!("unknown argument {other:?} (expected --seconds, --seed, --settings)"),
                }
            }
            Ok(out)
        }
    }

    pub fn run(args: RunArgs) -> anyhow::Result<()> {
        let settings = match &args.settings {
            Some(path) => Settings::load_from(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None => Settings::load(),
        };
        let seed = args.seed.unwrap_or_else(rand::random);
        let seconds = args.seconds.unwrap_or(60.0);
        let steps = (seconds / SIM_DT).round() as u64;
        log::info!("Water surface (native) seed={seed}, {seconds}s over {steps} steps");

        let mut surface = Surface::new(settings, seed)?;
        let (mut wake, mut line, mut expired, mut bounces) = (0usize, 0usize, 0usize, 0usize);
        for _ in 0..steps {
            for event in surface.on_tick(SIM_DT) {
                match event {
                    SurfaceEvent::RippleSpawned { source: RippleSource::Wake, .. } => wake += 1,
                    SurfaceEvent::RippleSpawned { source: RippleSource::Line, .. } => line += 1,
                    SurfaceEvent::RippleSpawned { .. } | SurfaceEvent::ModeChanged { .. } => {}
                    SurfaceEvent::RipplesExpired { count } => expired += count,
                    SurfaceEvent::BoatBounced { .. } => bounces += 1,
                }
            }
        }

        log::info!(
            "Ripples: {wake} wake, {line} line, {expired} expired, {} live; {bounces} bounces",
            surface.state().ripples.len()
        );
        let json = serde_json::to_string_pretty(surface.state()).context("serializing final state")?;
        println!("{json}");
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = native::RunArgs::parse(std::env::args().skip(1))?;
    native::run(args)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::native::RunArgs;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let parsed = RunArgs::parse(args(&["--seconds", "12.5", "--seed", "7", "--settings", "a.json"])).unwrap();
        assert_eq!(parsed.seconds, Some(12.5));
        assert_eq!(parsed.seed, Some(7));
        assert_eq!(parsed.settings.unwrap().to_str(), Some("a.json"));
    }

    #[test]
    fn test_parse_errors() {
        assert!(RunArgs::parse(args(&["--seconds"])).is_err());
        assert!(RunArgs::parse(args(&["--seconds", "-1"])).is_err());
        assert!(RunArgs::parse(args(&["--seed", "x"])).is_err());
        assert!(RunArgs::parse(args(&["--fast"])).is_err());
    }

    #[test]
    fn test_short_run() {
        let parsed = RunArgs::parse(args(&["--seconds", "1", "--seed", "3"])).unwrap();
        super::native::run(parsed).unwrap();
    }
}
