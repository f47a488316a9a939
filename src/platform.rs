/// Platform - Dependency injection container for all ports.
///
/// Hybrid approach:
/// - Stateless ports: `&'static` references (the logger)
/// - Stateful ports: `Rc<dyn Trait>` / `Rc<D>` (single-threaded, shared with spawned tasks)

use crate::ports::{DomPort, LoggerPort, PagePort, TimerPort, TransportPort};
use std::rc::Rc;

pub struct Platform<D: DomPort> {
    dom: Rc<D>,
    transport: Rc<dyn TransportPort>,
    timer: Rc<dyn TimerPort>,
    page: Rc<dyn PagePort>,
    logger: &'static dyn LoggerPort,
}

impl<D: DomPort> Clone for Platform<D> {
    fn clone(&self) -> Self {
        Self {
            dom: self.dom.clone(),
            transport: self.transport.clone(),
            timer: self.timer.clone(),
            page: self.page.clone(),
            logger: self.logger,
        }
    }
}

impl<D: DomPort> Platform<D> {
    /// Wires explicit ports together with the global logger.
    pub fn with_ports(
        dom: Rc<D>,
        transport: Rc<dyn TransportPort>,
        timer: Rc<dyn TimerPort>,
        page: Rc<dyn PagePort>,
    ) -> Self {
        Self {
            dom,
            transport,
            timer,
            page,
            logger: crate::adapters::logger(),
        }
    }

    #[inline]
    pub fn dom(&self) -> &D {
        &self.dom
    }

    #[inline]
    pub fn transport(&self) -> Rc<dyn TransportPort> {
        self.transport.clone()
    }

    #[inline]
    pub fn timer(&self) -> &dyn TimerPort {
        &*self.timer
    }

    #[inline]
    pub fn page(&self) -> Rc<dyn PagePort> {
        self.page.clone()
    }

    #[inline]
    pub fn logger(&self) -> &'static dyn LoggerPort {
        self.logger
    }
}

#[cfg(target_arch = "wasm32")]
impl Platform<crate::adapters::wasm::WebDom> {
    /// Creates a Platform backed by the current browser window.
    pub fn new() -> Result<Self, crate::domain::NotifyError> {
        use crate::adapters::wasm::{BrowserPage, FetchTransport, GlooTimer, WebDom};

        Ok(Self::with_ports(
            Rc::new(WebDom::new()?),
            Rc::new(FetchTransport::new()),
            Rc::new(GlooTimer::new()),
            Rc::new(BrowserPage::new()?),
        ))
    }
}
