//! Replays a recorded input script against a stage controller on virtual
//! time and prints the resulting navigation state.
//!
//! ```text
//! sectionflow-replay --script session.json [--config sectionflow.toml]
//! ```

use std::{fs, path::PathBuf, time::Duration};

use anyhow::{Context, bail};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sectionflow_config::ConfigLoad;
use sectionflow_core::{
    Bounds, CarouselSurface, FeedbackSurface, ImageRef, InputEvent,
    ModalSurface, NavigatorConfig, Point, ScrollBehavior, SectionHandle,
    SectionSpec, SectionSurface, StageBuilder, StageController, TimeProvider,
    VirtualTimeProvider,
};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "sectionflow-replay")]
#[command(about = "Replay a recorded input script through the section navigator")]
struct Cli {
    /// JSON script with sections and timestamped events
    #[arg(long)]
    script: PathBuf,

    /// Navigator config file (TOML or JSON); overrides env discovery
    #[arg(long, env = "SECTIONFLOW_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Jump instantly instead of smooth scrolling
    #[arg(long)]
    reduced_motion: bool,
}

#[derive(Debug, Deserialize)]
struct Script {
    sections: Vec<SectionSpec>,
    #[serde(default)]
    start: usize,
    #[serde(default)]
    anchor: Option<String>,
    #[serde(default)]
    carousel: Option<Bounds>,
    events: Vec<ScriptEvent>,
}

#[derive(Debug, Deserialize)]
struct ScriptEvent {
    at_ms: u64,
    event: InputEvent,
}

#[derive(Debug, Serialize)]
struct Summary {
    elapsed_ms: u64,
    current_index: usize,
    current_section: SectionHandle,
    locked: bool,
    transitions: usize,
    modal_open: bool,
    carousel_scroll_x: Option<f32>,
}

/// Every surface the stage can drive, reported through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
struct LogSurface;

impl SectionSurface for LogSurface {
    fn scroll_into_view(&mut self, section: SectionHandle, behavior: ScrollBehavior) {
        info!(section = section.0, ?behavior, "scroll section into view");
    }
}

impl CarouselSurface for LogSurface {
    fn scroll_by(&mut self, dx: f32, behavior: ScrollBehavior) {
        info!(dx, ?behavior, "scroll carousel");
    }
}

impl ModalSurface for LogSurface {
    fn show(&mut self, image: &ImageRef) {
        info!(src = %image.src, alt = %image.alt, "show lightbox");
    }

    fn hide(&mut self) {
        info!("hide lightbox");
    }
}

impl FeedbackSurface for LogSurface {
    fn haptic_pulse(&mut self, duration_ms: u32) {
        info!(duration_ms, "haptic pulse");
    }

    fn touch_highlight(&mut self, at: Point, active: bool) {
        tracing::debug!(x = at.x, y = at.y, active, "touch highlight");
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sectionflow_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let ConfigLoad { mut config, source } = match cli.config.as_deref() {
        Some(path) => NavigatorConfig::load_from_file(path)?,
        None => NavigatorConfig::load_from_env()?,
    };
    if cli.reduced_motion {
        config.motion.reduced_motion = true;
    }
    info!(?source, "navigator config loaded");

    let raw = fs::read_to_string(&cli.script).with_context(|| {
        format!("failed to read script {}", cli.script.display())
    })?;
    let script: Script = serde_json::from_str(&raw).with_context(|| {
        format!("invalid replay script {}", cli.script.display())
    })?;

    let summary = replay(script, config)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn replay(script: Script, config: NavigatorConfig) -> anyhow::Result<Summary> {
    if script.events.windows(2).any(|w| w[1].at_ms < w[0].at_ms) {
        bail!("script events must be ordered by at_ms");
    }

    let clock = VirtualTimeProvider::new();
    let mut builder = StageBuilder::new(script.sections)
        .start_at(script.start)
        .modal(LogSurface)
        .feedback(LogSurface)
        .config(config)
        .clock(clock.clone());
    if let Some(anchor) = script.anchor {
        builder = builder.next_section_anchor(anchor);
    }
    if let Some(bounds) = script.carousel {
        builder = builder.carousel(bounds, LogSurface);
    }
    let mut controller = builder.build(LogSurface)?;

    let mut transitions = 0;
    for ScriptEvent { at_ms, event } in script.events {
        transitions += run_until(&mut controller, &clock, Some(at_ms));
        let outcome = controller.handle(event);
        tracing::debug!(at_ms, ?outcome, "event handled");
        transitions += usize::from(outcome.admitted.is_some());
    }
    transitions += run_until(&mut controller, &clock, None);

    let state = controller.state();
    let section = controller
        .section(state.current_index)
        .context("current index outside the section list")?;
    Ok(Summary {
        elapsed_ms: u64::try_from(clock.elapsed().as_millis()).unwrap_or(u64::MAX),
        current_index: state.current_index,
        current_section: section,
        locked: state.locked,
        transitions,
        modal_open: controller.modal_state().visible,
        carousel_scroll_x: controller.carousel_state().map(|c| c.scroll_x),
    })
}

/// Fire every timer due before `until_ms` at its own deadline, then move
/// the clock to `until_ms`. With no bound, drain all pending timers.
/// Returns the number of transitions admitted by wheel flushes.
fn run_until(
    controller: &mut StageController,
    clock: &VirtualTimeProvider,
    until_ms: Option<u64>,
) -> usize {
    let until = until_ms.map(Duration::from_millis);
    let mut admitted = 0;

    while let Some(deadline) = controller.next_deadline() {
        let offset = clock.elapsed() + deadline.saturating_duration_since(clock.now());
        if until.is_some_and(|until| offset > until) {
            break;
        }
        clock.set_elapsed(offset);
        admitted += usize::from(controller.tick().is_some());
    }

    if let Some(until) = until {
        clock.set_elapsed(until);
        admitted += usize::from(controller.tick().is_some());
    }
    admitted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(events: serde_json::Value) -> Script {
        serde_json::from_value(serde_json::json!({
            "sections": [
                { "handle": 10 },
                { "handle": 11 },
                { "handle": 12, "anchor": "point" }
            ],
            "start": 0,
            "anchor": "point",
            "events": events
        }))
        .unwrap()
    }

    #[test]
    fn wheel_then_arrival_settles_on_next_section() {
        let script = script(serde_json::json!([
            { "at_ms": 0, "event": { "type": "wheel", "delta_y": 120 } },
            { "at_ms": 300, "event": { "type": "intersection", "entries": [
                { "section": 10, "ratio": 0.0 },
                { "section": 11, "ratio": 0.95 }
            ] } }
        ]));

        let summary = replay(script, NavigatorConfig::default()).unwrap();

        assert_eq!(summary.current_index, 1);
        assert_eq!(summary.current_section, SectionHandle(11));
        assert!(!summary.locked);
        assert_eq!(summary.transitions, 1);
        assert_eq!(summary.elapsed_ms, 400);
    }

    #[test]
    fn unconfirmed_transition_times_out_during_drain() {
        let script = script(serde_json::json!([
            { "at_ms": 10, "event": { "type": "click",
                "target": { "kind": "next_section" } } }
        ]));

        let summary = replay(script, NavigatorConfig::default()).unwrap();

        // the viewport never reported section 2, so the timeout resyncs
        assert_eq!(summary.current_index, 0);
        assert!(!summary.locked);
        assert_eq!(summary.transitions, 1);
        assert_eq!(summary.elapsed_ms, 710);
    }

    #[test]
    fn out_of_order_events_are_rejected() {
        let script = script(serde_json::json!([
            { "at_ms": 50, "event": { "type": "touch_cancel" } },
            { "at_ms": 20, "event": { "type": "touch_cancel" } }
        ]));

        assert!(replay(script, NavigatorConfig::default()).is_err());
    }

    #[test]
    fn summary_serializes_handle_transparently() {
        let script = script(serde_json::json!([]));

        let summary = replay(script, NavigatorConfig::default()).unwrap();
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["current_section"], 10);
        assert_eq!(json["modal_open"], false);
    }
}
