//! Calendar events: fetch and add.

use crate::api::Event;
use crate::context::AppContext;
use crate::outcome::{ActionResult, Failure};
use crate::validation::validate_event;

pub struct CalendarBoard<'a> {
    ctx: &'a AppContext,
    events: Vec<Event>,
}

impl<'a> CalendarBoard<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self {
            ctx,
            events: Vec::new(),
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// # Errors
    /// `FETCH_FAILED`, or the shared identity/401 errors.
    pub async fn refresh(&mut self) -> ActionResult<&[Event]> {
        let identity = self.ctx.identity()?;
        self.events = self
            .ctx
            .api()
            .list_events(&identity)
            .await
            .map_err(|err| self.ctx.api_failure(Failure::Fetch, "Failed to load events", err))?;
        Ok(&self.events)
    }

    /// Creates an event, then refetches.
    ///
    /// The secure posture trims both fields; the vulnerable one sends them
    /// as typed.
    ///
    /// # Errors
    /// A validation error (no request made), `ADD_FAILED`, or the shared
    /// identity/401 errors.
    pub async fn add(&mut self, title: &str, date: &str) -> ActionResult<()> {
        validate_event(title, date)?;
        let identity = self.ctx.identity()?;
        let (title, date) = if self.ctx.posture().trims_credentials() {
            (title.trim(), date.trim())
        } else {
            (title, date)
        };

        self.ctx
            .api()
            .create_event(&identity, title, date)
            .await
            .map_err(|err| self.ctx.api_failure(Failure::Add, "Failed to add event", err))?;

        self.refresh().await?;
        Ok(())
    }
}
