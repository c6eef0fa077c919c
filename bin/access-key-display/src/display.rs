use std::io::Write;
use std::time::Duration;

use futures::StreamExt;

use access_key_auth::{current_timestamp, seconds_left_in_window, AccessKeyAuth, AccessKeyError, Timestamp};
use access_key_config::AccessKeyConfig;
use crate::render::render_frame;
use crate::DisplayError;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Redraw(String),
    Unchanged,
    Failed(AccessKeyError),
}

/// Everything the redraw loop remembers between ticks.
#[derive(Debug)]
pub struct DisplayState {
    config: AccessKeyConfig,
    fixed_time: Option<Timestamp>,

    last_code: Option<String>,
    last_error: Option<AccessKeyError>,
}

impl DisplayState {
    pub fn new(config: AccessKeyConfig, fixed_time: Option<Timestamp>) -> Self {
        Self {
            config, fixed_time,
            last_code: None,
            last_error: None,
        }
    }

    pub fn config(&self) -> &AccessKeyConfig {
        &self.config
    }

    pub fn last_code(&self) -> Option<&str> {
        self.last_code.as_deref()
    }

    pub fn effective_time(&self, now: Timestamp) -> Timestamp {
        self.fixed_time.unwrap_or(now)
    }

    /// Regenerate for `now`. On failure the previous code is kept.
    pub fn tick(&mut self, now: Timestamp) -> TickOutcome {
        let t = self.effective_time(now);
        let result = AccessKeyAuth::generate(
            &self.config.key,
            &self.config.checol,
            self.config.timing_offset(),
            Some(t),
        );

        match result {
            Ok(code) => {
                self.last_error = None;
                if self.last_code.as_deref() == Some(code.as_str()) {
                    TickOutcome::Unchanged
                } else {
                    self.last_code = Some(code.clone());
                    TickOutcome::Redraw(code)
                }
            },
            Err(e) => {
                if self.last_error.as_ref() != Some(&e) {
                    log::error!("invalid key, keeping the last code on screen: {}", e);
                    self.last_error = Some(e.clone());
                }
                TickOutcome::Failed(e)
            },
        }
    }
}

fn draw<W: Write>(
    state: &mut DisplayState,
    now: Timestamp,
    show_qr: bool,
    out: &mut W,
) -> Result<(), DisplayError> {
    if let TickOutcome::Redraw(code) = state.tick(now) {
        let seconds_left = seconds_left_in_window(
            state.config().timing_offset(),
            state.effective_time(now),
        );
        out.write_all(render_frame(&code, seconds_left, show_qr)?.as_bytes())?;
        out.flush()?;
    }
    Ok(())
}

/// Tick once per second until `ticks` runs out, or forever.
pub async fn run<W: Write>(
    state: &mut DisplayState,
    ticks: Option<u64>,
    show_qr: bool,
    out: &mut W,
) -> Result<(), DisplayError> {
    let mut interval = async_std::stream::interval(TICK_INTERVAL);
    let mut remaining = ticks;

    loop {
        match current_timestamp() {
            Ok(now) => draw(state, now, show_qr, out)?,
            Err(e) => log::error!("skipping tick: {}", e),
        }

        if let Some(r) = remaining.as_mut() {
            *r = r.saturating_sub(1);
            if *r == 0 {
                break;
            }
        }

        interval.next().await;
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    const T: Timestamp = 1_000_000_000;

    fn state(key: &str) -> DisplayState {
        DisplayState::new(AccessKeyConfig::new(key, "", ""), None)
    }

    #[test]
    fn redraws_only_on_change() {
        let mut s = state("0102030405060708");

        assert_eq!(s.tick(T), TickOutcome::Redraw("505ee4f968e530cd17e1b4cd".to_string()));
        assert_eq!(s.tick(T + 1), TickOutcome::Unchanged);
        assert_eq!(s.tick(T + 3), TickOutcome::Unchanged);
        assert!(matches!(s.tick(T + 4), TickOutcome::Redraw(_)));
    }

    #[test]
    fn bad_key_keeps_last_code() {
        let mut s = state("zz");
        assert!(matches!(s.tick(T), TickOutcome::Failed(AccessKeyError::MalformedHexInput(_))));
        assert_eq!(s.last_code(), None);

        let mut s = state("0102030405060708");
        s.tick(T);
        s.config.key = "0102zz".to_string();
        assert!(matches!(s.tick(T + 10), TickOutcome::Failed(_)));
        assert_eq!(s.last_code(), Some("505ee4f968e530cd17e1b4cd"));
    }

    #[test]
    fn fixed_time_ignores_clock() {
        let mut s = DisplayState::new(AccessKeyConfig::new("0102030405060708", "", ""), Some(T));
        assert!(matches!(s.tick(1), TickOutcome::Redraw(_)));
        assert_eq!(s.tick(T + 500), TickOutcome::Unchanged);
        assert_eq!(s.last_code(), Some("505ee4f968e530cd17e1b4cd"));
    }

    #[test]
    fn draw_writes_frame_once() {
        let mut s = DisplayState::new(AccessKeyConfig::new("0102030405060708", "", ""), Some(T));
        let mut out = Vec::new();

        draw(&mut s, T, false, &mut out).unwrap();
        draw(&mut s, T, false, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "505ee4f968e530cd17e1b4cd  (rotates in 4s)\n");
    }

    #[async_std::test]
    async fn run_stops_after_ticks() {
        let mut s = DisplayState::new(AccessKeyConfig::new("0102030405060708", "lobby", ""), Some(T));
        let mut out = Vec::new();

        run(&mut s, Some(1), false, &mut out).await.unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "505ee4f968e530cd9cd9583f  (rotates in 4s)\n");
    }
}
