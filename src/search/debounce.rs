//! 검색어 입력 debounce
//!
//! 마지막 입력 후 정해진 시간 동안 추가 입력이 없을 때 한 번만 필터를 실행합니다.
//! 새 입력은 타이머를 다시 시작합니다. 스레드 없이 호출자가 넘겨주는 시각으로
//! 동작하므로 UI 이벤트 루프의 틱에서 [`SearchDebouncer::poll`]을 부르면 됩니다.

use std::time::{Duration, Instant};

/// Debounce 명령
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebounceCommand {
    /// 타이머 리셋 (키 입력 시)
    Reset(String),
    /// 타이머 취소 (검색어 지우기 등)
    Cancel,
    /// 즉시 트리거
    Trigger,
}

/// 검색어 debounce 타이머
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    quiet: Duration,
    pending: Option<(String, Instant)>,
}

impl SearchDebouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// 대기 중인 검색어가 있는지
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// 명령 처리. `Trigger`면 대기 중이던 검색어를 즉시 반환합니다.
    pub fn handle(&mut self, command: DebounceCommand, now: Instant) -> Option<String> {
        match command {
            DebounceCommand::Reset(text) => {
                self.pending = Some((text, now));
                None
            }
            DebounceCommand::Cancel => {
                self.pending = None;
                None
            }
            DebounceCommand::Trigger => self.pending.take().map(|(text, _)| text),
        }
    }

    /// 키 입력
    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        self.handle(DebounceCommand::Reset(text.into()), now);
    }

    /// 대기 중인 검색어 취소
    pub fn cancel(&mut self) {
        self.handle(DebounceCommand::Cancel, Instant::now());
    }

    /// 대기 시간이 지났으면 검색어를 한 번 반환
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let ready = match &self.pending {
            Some((_, last_input)) => now.saturating_duration_since(*last_input) >= self.quiet,
            None => false,
        };
        if ready {
            self.handle(DebounceCommand::Trigger, now)
        } else {
            None
        }
    }
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::from_millis(300)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::from_millis(300);
        debouncer.input("가", start);

        assert_eq!(debouncer.poll(start + Duration::from_millis(299)), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(300)).as_deref(),
            Some("가")
        );
        // 한 번만
        assert_eq!(debouncer.poll(start + Duration::from_millis(900)), None);
    }

    #[test]
    fn test_new_input_restarts_timer() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::from_millis(300);
        debouncer.input("가", start);
        debouncer.input("가나", start + Duration::from_millis(200));

        assert_eq!(debouncer.poll(start + Duration::from_millis(400)), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(500)).as_deref(),
            Some("가나")
        );
    }

    #[test]
    fn test_cancel_and_trigger() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::default();
        debouncer.input("家", start);
        debouncer.cancel();
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(start + Duration::from_secs(1)), None);

        debouncer.input("女", start);
        assert_eq!(
            debouncer.handle(DebounceCommand::Trigger, start).as_deref(),
            Some("女")
        );
    }

    #[test]
    fn test_cancel_command() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::default();
        debouncer.input("家", start);
        assert_eq!(debouncer.handle(DebounceCommand::Cancel, start), None);
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.handle(DebounceCommand::Trigger, start), None);
    }
}
