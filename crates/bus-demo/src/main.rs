//! # Bus Demo
//!
//! Drives a short scenario through the typed bus:
//!
//! 1. Subscribe to three of the four demo events through a tag manager
//! 2. Publish all four (the unsubscribed one is a silent no-op)
//! 3. Try to release a tag while naming the wrong event type (rejected)
//! 4. Release it with the right type, then publish again (nobody listens)
//!
//! Logging is configured from the environment, see `bus-telemetry`.

mod events;

use anyhow::{ensure, Context, Result};
use bus_telemetry::{init_telemetry, log_event, TelemetryConfig};
use tracing::info;
use typed_bus::{EventBus, SubscriptionManager};

use crate::events::{
    ButtonPressed, DemoEvents, PointerMoved, SubscriptionTag, WindowClosed, WindowResized,
};

type DemoManager<'bus> = SubscriptionManager<'bus, SubscriptionTag, DemoEvents>;

fn main() -> Result<()> {
    let _telemetry = init_telemetry(TelemetryConfig::for_service("bus-demo"))
        .context("failed to initialize telemetry")?;

    run()
}

fn run() -> Result<()> {
    let bus = EventBus::<DemoEvents>::new();
    let mut manager = DemoManager::new(bus.subscriber());
    subscribe_to_events(&mut manager)?;

    let publisher = bus.publisher();

    let delivered = publisher.publish(&PointerMoved { x: 1, y: 1 });
    ensure!(delivered == 1, "PointerMoved reached {delivered} callbacks");
    publisher.publish(&ButtonPressed);
    publisher.publish(&WindowClosed);

    // Nobody subscribed to WindowResized.
    let delivered = publisher.publish(&WindowResized);
    ensure!(delivered == 0, "WindowResized reached {delivered} callbacks");

    // The ButtonPressed tag does not own a PointerMoved subscription, so
    // this is refused and the subscription stays in place.
    ensure!(
        !manager.unsub_as::<PointerMoved>(SubscriptionTag::ButtonPressed),
        "unsubscribing with the wrong event type succeeded"
    );
    ensure!(
        manager.unsub_as::<ButtonPressed>(SubscriptionTag::ButtonPressed),
        "unsubscribing ButtonPressed failed"
    );

    let delivered = publisher.publish(&ButtonPressed);
    ensure!(delivered == 0, "ButtonPressed still reached {delivered} callbacks");

    log_event!(
        info,
        "demo",
        "Demo finished",
        remaining_tags = manager.len(),
        events_published = bus.events_published()
    );
    Ok(())
}

fn subscribe_to_events(manager: &mut DemoManager<'_>) -> Result<()> {
    let subscribed = manager.sub(SubscriptionTag::PointerMoved, |moved: &PointerMoved| {
        info!(x = moved.x, y = moved.y, "PointerMoved has been published");
    });
    ensure!(subscribed, "PointerMoved tag already in use");

    // The erased form: the callback unpacks the event itself.
    let subscribed = manager.sub_any::<ButtonPressed, _>(SubscriptionTag::ButtonPressed, |event| {
        let _pressed: &ButtonPressed = event.unpack();
        info!(event_type = %event.event_type(), "ButtonPressed has been published");
    });
    ensure!(subscribed, "ButtonPressed tag already in use");

    let subscribed = manager.sub(SubscriptionTag::WindowClosed, |_: &WindowClosed| {
        info!("WindowClosed has been published");
    });
    ensure!(subscribed, "WindowClosed tag already in use");

    Ok(())
}
