//! # Example: walkthrough
//!
//! Drives both bus flavours through the same subscribe/publish/unsubscribe
//! sequence.
//!
//! Shows how to:
//! - Register subscribers as shared (`Arc`) and borrowed (`&'static`) handles.
//! - Chain `subscribe` and `publish` calls.
//! - Publish a shape nobody listens to.
//! - Handle `BusError::AlreadySubscribed`.
//! - Drain a concurrent bus before exit.
//!
//! ## Flow
//! ```text
//! subscribe(int#2, int#1, str#1, str#2)
//!     ├─► publish(IntEvent 101)            ──► int#2, int#1
//!     ├─► publish(StringEvent "Nick") × 7  ──► str#1, str#2
//!     ├─► publish(true)                    ──► nobody
//!     ├─► subscribe(int#1) again           ──► AlreadySubscribed
//!     └─► unsubscribe / re-subscribe / unsubscribe
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=typebus=debug cargo run --example walkthrough
//! ```

use std::fmt::Display;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use typebus::{Bus, BusError, Config, Deliver, Subscribe, SubscriberRef};

#[derive(Clone, Debug)]
struct Payload<T> {
    value: T,
}

type IntEvent = Payload<i32>;
type StringEvent = Payload<String>;

/// Prints every value it receives.
struct Printer<T> {
    label: &'static str,
    _value: PhantomData<fn(T)>,
}

impl<T> Printer<T> {
    const fn new(label: &'static str) -> Self {
        Self {
            label,
            _value: PhantomData,
        }
    }
}

impl<T> Subscribe<Payload<T>> for Printer<T>
where
    T: Display + Send + Sync + 'static,
{
    fn on_event(&self, ev: &Payload<T>) {
        println!("[{}] received event of value {}", self.label, ev.value);
    }

    fn name(&self) -> &'static str {
        self.label
    }
}

static INT_EXTERNAL: Printer<i32> = Printer::new("int#2");
static STRING_FIRST: Printer<String> = Printer::new("str#1");
static STRING_SECOND: Printer<String> = Printer::new("str#2");

fn drive<D: Deliver>(bus: &Bus<D>) -> Result<(), BusError> {
    let owned = SubscriberRef::<IntEvent>::shared(Arc::new(Printer::new("int#1")));
    let external = SubscriberRef::<IntEvent>::borrowed(&INT_EXTERNAL);

    bus.subscribe(external.clone())?
        .subscribe(owned.clone())?
        .subscribe(SubscriberRef::<StringEvent>::borrowed(&STRING_FIRST))?
        .subscribe(SubscriberRef::<StringEvent>::borrowed(&STRING_SECOND))?;

    let nick = StringEvent {
        value: "Nick".to_string(),
    };
    bus.publish(IntEvent { value: 101 });
    for _ in 0..7 {
        bus.publish_ref(&nick);
    }
    bus.publish(true);

    match bus.subscribe(owned.clone()) {
        Err(err @ BusError::AlreadySubscribed { .. }) => {
            println!("caught expected error: {err}");
        }
        Err(err) => return Err(err),
        Ok(_) => println!("duplicate subscription was accepted"),
    }

    bus.unsubscribe(&owned);
    bus.subscribe(owned.clone())?;
    bus.unsubscribe(&owned).unsubscribe(&external);

    println!(
        "remaining: int={} string={} shapes={:?}",
        bus.subscriber_count::<IntEvent>(),
        bus.subscriber_count::<StringEvent>(),
        bus.shapes()
    );
    Ok(())
}

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("== synchronous ==");
    let sync_bus = Bus::builder(Config::default()).synchronous();
    drive(&sync_bus)?;

    println!("== concurrent ==");
    let concurrent_bus = Bus::builder(Config::default()).concurrent()?;
    drive(&concurrent_bus)?;
    concurrent_bus.delivery().wait_idle().await;

    Ok(())
}
