use super::clicks::Click;
use super::config::WidgetConfig;
use super::error::NotifyError;
use super::handlers::{self, CONTROL_ID_ATTR, MARK_ACTION_ATTR};
use super::poller::Poller;
use super::transport::Transport;
use super::types::MarkAction;
use super::validation;
use crate::platform::Platform;
use crate::ports::dom::attribute_selector;
use crate::ports::DomPort;
use std::cell::Cell;
use std::rc::Rc;

/// Entry points for the four widget interactions.
///
/// Each action sends its request and, once a response arrives, hands it to
/// the matching handler. Network failures leave the DOM untouched and are
/// logged before being returned.
///
/// Actions are not serialized: two overlapping requests for the same
/// notification both apply, in the order their responses arrive.
pub struct NotificationWidget<D: DomPort> {
    platform: Platform<D>,
    config: Rc<WidgetConfig>,
    transport: Transport,
    started: Cell<bool>,
}

impl<D: DomPort> NotificationWidget<D> {
    pub fn new(platform: Platform<D>, config: WidgetConfig) -> Result<Self, NotifyError> {
        validation::validate_config(&config)?;
        let config = Rc::new(config);
        let transport = Transport::new(config.clone(), platform.transport(), platform.page());
        Ok(Self {
            platform,
            config,
            transport,
            started: Cell::new(false),
        })
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn platform(&self) -> &Platform<D> {
        &self.platform
    }

    pub fn poller(&self) -> Poller<D> {
        Poller::new(
            self.platform.clone(),
            self.config.clone(),
            self.transport.clone(),
        )
    }

    /// Records that click handling and the poll loop were started. Returns
    /// `false` if they already were.
    pub fn claim_start(&self) -> bool {
        !self.started.replace(true)
    }

    pub fn is_started(&self) -> bool {
        self.started.get()
    }

    fn report<T>(&self, action: &str, result: Result<T, NotifyError>) -> Result<T, NotifyError> {
        if let Err(e) = &result {
            self.platform
                .logger()
                .error(&format!("Notification {action} failed: {e}"));
        }
        result
    }

    fn control_id(&self, control: &D::Element) -> Result<String, NotifyError> {
        let id = self
            .platform
            .dom()
            .get_attribute(control, CONTROL_ID_ATTR)
            .unwrap_or_default();
        validation::validate_notification_id(&id)?;
        Ok(id)
    }

    fn control_action(&self, control: &D::Element) -> Result<MarkAction, NotifyError> {
        self.platform
            .dom()
            .get_attribute(control, MARK_ACTION_ATTR)
            .unwrap_or_default()
            .parse()
    }

    /// Marks the notification a clicked mark control belongs to, using the
    /// action stored on the control.
    pub async fn mark(&self, control: &D::Element) -> Result<(), NotifyError> {
        let result = self.mark_control(control).await;
        self.report("mark", result)
    }

    async fn mark_control(&self, control: &D::Element) -> Result<(), NotifyError> {
        let id = self.control_id(control)?;
        let action = self.control_action(control)?;
        let response = self.transport.mark_one(&id, action).await?;
        handlers::apply_mark_one(
            self.platform.dom(),
            self.platform.logger(),
            &self.config,
            &id,
            Some(control),
            action,
            &response,
        )
    }

    /// Marks a notification by id. The first mark control carrying that id,
    /// if the page renders one, is retargeted as if it had been clicked.
    pub async fn mark_by_id(&self, id: &str, action: MarkAction) -> Result<(), NotifyError> {
        let result = self.mark_id(id, action).await;
        self.report("mark", result)
    }

    async fn mark_id(&self, id: &str, action: MarkAction) -> Result<(), NotifyError> {
        validation::validate_notification_id(id)?;
        let response = self.transport.mark_one(id, action).await?;

        let selector = format!(
            "{}{}",
            self.config.mark_selector,
            attribute_selector(CONTROL_ID_ATTR, id)
        );
        let control = self.platform.dom().query_first(&selector);
        handlers::apply_mark_one(
            self.platform.dom(),
            self.platform.logger(),
            &self.config,
            id,
            control.as_ref(),
            action,
            &response,
        )
    }

    pub async fn mark_all(&self, action: MarkAction) -> Result<(), NotifyError> {
        let result = self.send_mark_all(action).await;
        self.report("mark all", result)
    }

    async fn send_mark_all(&self, action: MarkAction) -> Result<(), NotifyError> {
        let response = self.transport.mark_all(action).await?;
        handlers::apply_mark_all(
            self.platform.dom(),
            self.platform.logger(),
            &self.config,
            action,
            &response,
        )
    }

    /// Mark-all triggered from a control carrying `data-mark-action`.
    pub async fn mark_all_from(&self, control: &D::Element) -> Result<(), NotifyError> {
        let action = self.control_action(control);
        let action = self.report("mark all", action)?;
        self.mark_all(action).await
    }

    /// Deletes the notification a clicked delete control belongs to.
    pub async fn delete(&self, control: &D::Element) -> Result<(), NotifyError> {
        let id = self.control_id(control);
        let id = self.report("delete", id)?;
        self.delete_by_id(&id).await
    }

    pub async fn delete_by_id(&self, id: &str) -> Result<(), NotifyError> {
        let result = self.send_delete(id).await;
        self.report("delete", result)
    }

    /// Runs the action behind a resolved click.
    pub async fn handle_click(&self, click: Click<D::Element>) -> Result<(), NotifyError> {
        match click {
            Click::Mark(control) => self.mark(&control).await,
            Click::MarkAll(control) => self.mark_all_from(&control).await,
            Click::Delete(control) => self.delete(&control).await,
        }
    }

    async fn send_delete(&self, id: &str) -> Result<(), NotifyError> {
        validation::validate_notification_id(id)?;
        let response = self.transport.delete_one(id).await?;
        handlers::apply_delete(
            self.platform.dom(),
            self.platform.logger(),
            &self.config,
            id,
            &response,
        );
        Ok(())
    }
}
