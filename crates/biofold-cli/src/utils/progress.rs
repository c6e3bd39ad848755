use biofold::engine::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK: Duration = Duration::from_millis(80);
const PHASE_TEMPLATE: &str = "{spinner:.green} {prefix:.bold} {msg}";
const SCORING_TEMPLATE: &str =
    "{prefix:.bold} [{bar:30.cyan/blue}] {pos}/{len} models | best: {msg}";

fn style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
}

struct ProgressView {
    bar: ProgressBar,
    phase: &'static str,
    best_mean: Option<f64>, // Mean of the model shown as best in this batch
}

impl ProgressView {
    fn start_phase(&mut self, name: &'static str) {
        self.phase = name;
        self.bar.reset();
        self.bar.set_length(0);
        self.bar.set_style(style(PHASE_TEMPLATE));
        self.bar.set_prefix(name);
        self.bar.set_message("");
        self.bar.enable_steady_tick(SPINNER_TICK);
    }

    fn start_scoring(&mut self, models: u64) {
        self.best_mean = None;
        self.bar.disable_steady_tick();
        self.bar.reset();
        self.bar.set_style(style(SCORING_TEMPLATE));
        self.bar.set_length(models);
        self.bar.set_prefix("Scoring");
        self.bar.set_message("-");
    }

    // Ties keep the earlier model and NaN never takes the lead, as in the report.
    fn record(&mut self, model: &str, mean: f64) {
        let leads = match self.best_mean {
            None => !mean.is_nan(),
            Some(best) => mean > best,
        };
        if leads {
            self.best_mean = Some(mean);
            self.bar.set_message(format!("{} ({:.2})", model, mean));
        }
    }

    fn finish_scoring(&mut self) {
        if let Some(len) = self.bar.length() {
            self.bar.set_position(len);
        }
        self.bar.finish();
    }

    fn finish_phase(&mut self) {
        self.bar.disable_steady_tick();
        self.bar.finish_with_message(format!("{} done", self.phase));
    }

    fn apply(&mut self, event: Progress) {
        match event {
            Progress::PhaseStart { name } => self.start_phase(name),
            Progress::PhaseFinish => self.finish_phase(),
            Progress::TaskStart { total_steps } => self.start_scoring(total_steps),
            Progress::TaskIncrement => self.bar.inc(1),
            Progress::TaskFinish => self.finish_scoring(),
            Progress::ModelScored { model, mean } => self.record(&model, mean),
            Progress::Message(msg) => self.bar.println(format!("  {}", msg)),
        }
    }
}

/// Renders extraction and import progress on stderr.
///
/// Phases show as a spinner. Scoring shows a bar over the batch together with
/// the best model so far.
#[derive(Clone)]
pub struct CliProgressHandler {
    view: Arc<Mutex<ProgressView>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), target);
        bar.finish_and_clear();
        Self {
            view: Arc::new(Mutex::new(ProgressView {
                bar,
                phase: "",
                best_mean: None,
            })),
        }
    }

    pub fn callback(&self) -> ProgressCallback<'static> {
        let view = Arc::clone(&self.view);
        Box::new(move |event: Progress| match view.lock() {
            Ok(mut view) => view.apply(event),
            Err(_) => warn!("Progress display lock was poisoned; dropping event."),
        })
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn hidden() -> CliProgressHandler {
        CliProgressHandler::with_target(ProgressDrawTarget::hidden())
    }

    fn message(handler: &CliProgressHandler) -> String {
        handler.view.lock().unwrap().bar.message()
    }

    fn scored(model: &str, mean: f64) -> Progress {
        Progress::ModelScored {
            model: model.to_string(),
            mean,
        }
    }

    #[test]
    fn handler_starts_idle() {
        let handler = hidden();
        let view = handler.view.lock().unwrap();
        assert!(view.bar.is_finished());
        assert!(view.best_mean.is_none());
    }

    #[test]
    fn bar_follows_the_batch_and_shows_the_leader() {
        let handler = hidden();
        let callback = handler.callback();

        callback(Progress::PhaseStart { name: "Scoring" });
        callback(Progress::TaskStart { total_steps: 3 });
        callback(scored("fold_model_0", 70.0));
        callback(Progress::TaskIncrement);
        callback(scored("fold_model_1", 88.126));
        callback(Progress::TaskIncrement);
        {
            let view = handler.view.lock().unwrap();
            assert_eq!(view.bar.length(), Some(3));
            assert_eq!(view.bar.position(), 2);
            assert_eq!(view.bar.message(), "fold_model_1 (88.13)");
        }

        callback(scored("fold_model_2", 40.0));
        callback(Progress::TaskIncrement);
        callback(Progress::TaskFinish);
        callback(Progress::PhaseFinish);

        let view = handler.view.lock().unwrap();
        assert!(view.bar.is_finished());
        assert_eq!(view.bar.message(), "Scoring done");
        assert_eq!(view.best_mean, Some(88.126));
    }

    #[test]
    fn ties_and_nan_do_not_take_the_lead() {
        let handler = hidden();
        let callback = handler.callback();

        callback(Progress::TaskStart { total_steps: 3 });
        callback(scored("nan_model", f64::NAN));
        assert_eq!(message(&handler), "-");
        callback(scored("first", 80.0));
        assert_eq!(message(&handler), "first (80.00)");
        callback(scored("second", 80.0));
        assert_eq!(message(&handler), "first (80.00)");
    }

    #[test]
    fn new_batch_resets_the_leader() {
        let handler = hidden();
        let callback = handler.callback();

        callback(Progress::TaskStart { total_steps: 1 });
        callback(scored("old", 99.0));
        callback(Progress::TaskFinish);
        callback(Progress::TaskStart { total_steps: 1 });
        assert_eq!(message(&handler), "-");
        callback(scored("new", 10.0));
        assert_eq!(message(&handler), "new (10.00)");
    }

    #[test]
    fn callback_is_usable_from_another_thread() {
        let handler = hidden();
        let callback = handler.callback();

        thread::spawn(move || {
            callback(Progress::PhaseStart { name: "Unpacking" });
            callback(Progress::Message("Unpacked zip archive".into()));
            callback(Progress::PhaseFinish);
        })
        .join()
        .unwrap();

        let view = handler.view.lock().unwrap();
        assert!(view.bar.is_finished());
        assert_eq!(view.bar.message(), "Unpacking done");
    }
}
