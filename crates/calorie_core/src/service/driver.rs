//! In-process loop that runs controller requests against a service.
//!
//! Replies are delivered in issue order, so nothing goes stale here; hosts
//! with real concurrency call `execute` themselves and feed replies back in
//! whatever order they complete.

use crate::service::CalorieService;
use crate::view::{Msg, Reply, Request, ViewController};
use log::debug;
use std::collections::VecDeque;

/// Runs one request and wraps its result as a completion message.
pub fn execute<S: CalorieService + ?Sized>(service: &S, request: &Request) -> Msg {
    let reply = match request {
        Request::FetchDay { ticket, date } => Reply::DayLoaded {
            ticket: *ticket,
            result: service.fetch_day(*date),
        },
        Request::FetchMonth { ticket, month } => Reply::MonthLoaded {
            ticket: *ticket,
            month: *month,
            result: service.fetch_month(*month),
        },
        Request::Search(search) => Reply::SearchCompleted {
            ticket: search.ticket,
            result: service.search(&search.query),
        },
        Request::WriteConf(write) => Reply::ConfWritten {
            write: *write,
            result: service.write_conf(write.key, write.value),
        },
        Request::AddItem(item) => Reply::ItemWritten {
            result: service.add_item(item).map(|_| ()),
        },
        Request::EditItem { id, patch } => Reply::ItemWritten {
            result: service.edit_item(*id, patch),
        },
        Request::RemoveItem(id) => Reply::ItemWritten {
            result: service.remove_item(*id),
        },
        Request::RecordWeight(point) => Reply::WeightWritten {
            result: service.record_weight(*point),
        },
        Request::FetchWeightHistory { ticket, since } => Reply::WeightHistoryLoaded {
            ticket: *ticket,
            result: service.weight_history(*since),
        },
    };
    Msg::Completed(reply)
}

/// Owns a controller and a service and runs dispatches to quiescence.
pub struct Driver<S> {
    controller: ViewController,
    service: S,
    queue: VecDeque<Request>,
}

impl<S: CalorieService> Driver<S> {
    pub fn new(controller: ViewController, service: S) -> Self {
        Self {
            controller,
            service,
            queue: VecDeque::new(),
        }
    }

    /// Applies `msg`, then executes requests until none are left.
    ///
    /// Returns the number of requests executed.
    pub fn dispatch(&mut self, msg: Msg) -> usize {
        let outcome = self.controller.update(msg);
        self.queue.extend(outcome.requests);

        let mut executed = 0;
        while let Some(request) = self.queue.pop_front() {
            let completion = execute(&self.service, &request);
            let outcome = self.controller.update(completion);
            self.queue.extend(outcome.requests);
            executed += 1;
        }
        debug!("event=dispatch module=driver status=ok executed={executed}");
        executed
    }

    pub fn controller(&self) -> &ViewController {
        &self.controller
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn into_parts(self) -> (ViewController, S) {
        (self.controller, self.service)
    }
}
