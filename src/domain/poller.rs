use super::config::WidgetConfig;
use super::handlers;
use super::transport::Transport;
use crate::platform::Platform;
use crate::ports::DomPort;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    Idle,
    WaitingResponse,
    Scheduled,
    /// The start guard failed; no request will ever be issued.
    Disabled,
}

/// Sequential update loop: poll, wait for the response, sleep, repeat.
///
/// A cycle never overlaps the previous one. Failed polls are logged and the
/// next cycle is scheduled anyway.
pub struct Poller<D: DomPort> {
    platform: Platform<D>,
    config: Rc<WidgetConfig>,
    transport: Transport,
    state: Cell<PollerState>,
    flag: RefCell<Option<String>>,
}

impl<D: DomPort> Poller<D> {
    pub fn new(platform: Platform<D>, config: Rc<WidgetConfig>, transport: Transport) -> Self {
        Self {
            platform,
            config,
            transport,
            state: Cell::new(PollerState::Idle),
            flag: RefCell::new(None),
        }
    }

    pub fn state(&self) -> PollerState {
        self.state.get()
    }

    /// Watermark sent with the most recent poll.
    pub fn flag(&self) -> Option<String> {
        self.flag.borrow().clone()
    }

    /// Polls until the page goes away.
    pub async fn run(&self) {
        self.run_cycles(None).await;
    }

    /// Polls at most `limit` times and returns how many polls were issued.
    /// The delay is only awaited between polls, so `n` polls imply `n - 1`
    /// reschedules.
    pub async fn run_cycles(&self, limit: Option<usize>) -> usize {
        let logger = self.platform.logger();

        let Some(initial) = handlers::watermark(self.platform.dom(), &self.config) else {
            logger.warn("Notify improperly configured. No data-nf-id was found.");
            logger.warn(&format!(
                "  Make sure you have a container element with '{}' as css class.",
                self.config.nf_box_list_selector
            ));
            self.state.set(PollerState::Disabled);
            return 0;
        };
        *self.flag.borrow_mut() = Some(initial);

        let mut polls = 0;
        loop {
            self.poll_once().await;
            polls += 1;

            if limit.is_some_and(|max| polls >= max) {
                self.state.set(PollerState::Idle);
                return polls;
            }

            self.state.set(PollerState::Scheduled);
            self.platform
                .timer()
                .sleep(self.config.update_interval_ms)
                .await;
        }
    }

    async fn poll_once(&self) {
        let logger = self.platform.logger();
        let Some(flag) = self.flag() else {
            return;
        };

        self.state.set(PollerState::WaitingResponse);
        logger.time("notify_poll");
        let result = self.transport.poll_updates(&flag).await;
        logger.time_end("notify_poll");

        match result {
            Ok(response) => {
                match handlers::apply_update(self.platform.dom(), logger, &self.config, &response)
                {
                    Ok(Some(next)) => *self.flag.borrow_mut() = Some(next),
                    Ok(None) => {}
                    Err(e) => logger.error(&format!("Failed to apply notification update: {e}")),
                }
            }
            Err(e) => logger.warn(&format!("Notification poll failed: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::native::{FixedPage, MemoryDom, MockTransport, RecordingTimer};
    use crate::ports::Method;
    use futures::executor::block_on;

    struct Harness {
        dom: Rc<MemoryDom>,
        transport: Rc<MockTransport>,
        timer: Rc<RecordingTimer>,
        poller: Poller<MemoryDom>,
    }

    fn harness(dom: MemoryDom) -> Harness {
        let dom = Rc::new(dom);
        let transport = Rc::new(MockTransport::new());
        let timer = Rc::new(RecordingTimer::new());
        let config = Rc::new(WidgetConfig {
            update_interval_ms: 250,
            ..WidgetConfig::default()
        });
        let platform = Platform::with_ports(
            dom.clone(),
            transport.clone(),
            timer.clone(),
            Rc::new(FixedPage::new("csrftoken=tok", "http:", "localhost")),
        );
        let poller = Poller::new(
            platform.clone(),
            config.clone(),
            Transport::new(config, platform.transport(), platform.page()),
        );
        Harness {
            dom,
            transport,
            timer,
            poller,
        }
    }

    fn dom_with_box(first_id: Option<&str>) -> MemoryDom {
        let dom = MemoryDom::new();
        let list = dom.append(dom.root(), "ul", &["notification-box-list"], &[]);
        if let Some(id) = first_id {
            dom.append(list, "li", &["notification-box"], &[("data-nf-id", id)]);
        }
        dom
    }

    const EMPTY_UPDATE: &str =
        r#"{"success": true, "retrieved": 0, "unread_count": 0, "notifications": [], "msg": "No new notifications."}"#;

    #[test]
    fn test_missing_container_disables_polling() {
        let h = harness(MemoryDom::new());

        let polls = block_on(h.poller.run_cycles(Some(3)));

        assert_eq!(polls, 0);
        assert!(h.transport.requests().is_empty());
        assert!(h.timer.sleeps().is_empty());
        assert_eq!(h.poller.state(), PollerState::Disabled);
    }

    #[test]
    fn test_empty_container_disables_polling() {
        let h = harness(dom_with_box(None));

        let polls = block_on(h.poller.run_cycles(Some(3)));

        assert_eq!(polls, 0);
        assert!(h.transport.requests().is_empty());
        assert_eq!(h.poller.state(), PollerState::Disabled);
    }

    #[test]
    fn test_first_poll_sends_flag_of_first_child() {
        let h = harness(dom_with_box(Some("42")));
        h.transport.push_json(200, EMPTY_UPDATE);

        block_on(h.poller.run_cycles(Some(1)));

        let requests = h.transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Get);
        assert!(requests[0].url.contains("flag=42"));
    }

    #[test]
    fn test_n_successful_polls_schedule_n_plus_one_requests() {
        let h = harness(dom_with_box(Some("42")));
        let n = 4;
        for _ in 0..=n {
            h.transport.push_json(200, EMPTY_UPDATE);
        }

        let polls = block_on(h.poller.run_cycles(Some(n + 1)));

        assert_eq!(polls, n + 1);
        assert_eq!(h.transport.requests().len(), n + 1);
        assert_eq!(h.timer.sleeps(), vec![250; n]);
    }

    #[test]
    fn test_failed_polls_still_reschedule() {
        let h = harness(dom_with_box(Some("42")));
        h.transport.push_failure("offline");
        h.transport.push_json(500, "<h1>Server Error</h1>");
        h.transport.push_json(200, EMPTY_UPDATE);

        let polls = block_on(h.poller.run_cycles(Some(3)));

        assert_eq!(polls, 3);
        assert_eq!(h.transport.requests().len(), 3);
        assert_eq!(h.timer.sleeps().len(), 2);
    }

    #[test]
    fn test_watermark_advances_after_update() {
        let h = harness(dom_with_box(Some("42")));
        h.transport.push_json(
            200,
            r#"{"success": true, "retrieved": 1, "unread_count": 1,
                "notifications": [{"id": 43, "html": "<li class=\"notification-box\" data-nf-id=\"43\">new</li>"}]}"#,
        );
        h.transport.push_json(200, EMPTY_UPDATE);

        block_on(h.poller.run_cycles(Some(2)));

        let requests = h.transport.requests();
        assert!(requests[0].url.contains("flag=42"));
        assert!(requests[1].url.contains("flag=43"));
        assert_eq!(h.poller.flag().as_deref(), Some("43"));
        assert!(h.dom.query_first("[data-nf-id=\"43\"]").is_some());
    }
}
