//! # End-to-End Scenario
//!
//! A bus over four event types, three of them owned by a tagged manager:
//!
//! ```text
//!   Publisher ──publish(A{1,1})──► EventBus<ScenarioEvents> ──► cb(A)
//!                                        ▲
//!   SubscriptionManager ──sub(A, B, D)───┘
//!                       ──unsub(B)──────► B goes quiet
//! ```

#[cfg(test)]
mod tests {
    use crate::fixtures::{CallLog, EventA, EventB, EventC, EventD, ScenarioEvents, Tag};
    use std::cell::Cell;
    use std::rc::Rc;
    use typed_bus::{EventBus, SubscriptionManager};

    // =========================================================================
    // HAPPY PATH
    // =========================================================================

    #[test]
    fn test_scenario_dispatch_and_tagged_unsubscribe() {
        let bus = EventBus::<ScenarioEvents>::new();
        let publisher = bus.publisher();
        let log = CallLog::new();
        let last_a = Rc::new(Cell::new((0, 0)));

        let mut manager = SubscriptionManager::new(bus.subscriber());

        let sink = log.clone();
        let seen = Rc::clone(&last_a);
        assert!(manager.sub(Tag::A, move |a: &EventA| {
            seen.set((a.x, a.y));
            sink.record("A");
        }));
        let sink = log.clone();
        assert!(manager.sub(Tag::B, move |_: &EventB| sink.record("B")));
        let sink = log.clone();
        assert!(manager.sub(Tag::D, move |_: &EventD| sink.record("D")));

        assert_eq!(publisher.publish(&EventA { x: 1, y: 1 }), 1);
        assert_eq!(last_a.get(), (1, 1));

        assert_eq!(publisher.publish(&EventB), 1);
        assert_eq!(publisher.publish(&EventC), 0);
        assert_eq!(publisher.publish(&EventD), 1);
        assert_eq!(log.drain(), vec!["A", "B", "D"]);

        assert!(manager.unsub(Tag::B));
        assert_eq!(publisher.publish(&EventB), 0);
        assert!(log.is_empty());

        // The other tags keep working.
        assert_eq!(publisher.publish(&EventD), 1);
        assert_eq!(log.drain(), vec!["D"]);
        assert_eq!(bus.events_published(), 6);
    }

    #[test]
    fn test_manager_drop_leaves_bus_empty() {
        let bus = EventBus::<ScenarioEvents>::new();
        let log = CallLog::new();

        {
            let mut manager = SubscriptionManager::new(bus.subscriber());
            for tag in [Tag::A, Tag::ASecondary] {
                let sink = log.clone();
                assert!(manager.sub(tag, move |_: &EventA| sink.record(format!("{tag:?}"))));
            }
            let sink = log.clone();
            assert!(manager.sub(Tag::C, move |_: &EventC| sink.record("C")));

            assert_eq!(bus.publisher().publish(&EventA { x: 0, y: 0 }), 2);
            assert_eq!(bus.subscription_count(), 3);
        }

        assert_eq!(bus.subscription_count(), 0);
        assert!(bus.active_event_types().is_empty());
        assert_eq!(bus.publisher().publish(&EventA { x: 0, y: 0 }), 0);
        assert_eq!(bus.publisher().publish(&EventC), 0);
        assert_eq!(log.drain(), vec!["A", "ASecondary"]);
    }

    // =========================================================================
    // MIXED DIRECT AND TAGGED SUBSCRIBERS
    // =========================================================================

    #[test]
    fn test_direct_and_tagged_subscriptions_coexist() {
        let bus = EventBus::<ScenarioEvents>::new();
        let log = CallLog::new();

        let sink = log.clone();
        let direct = bus.subscriber().subscribe(move |_: &EventB| sink.record("direct"));

        {
            let mut manager = SubscriptionManager::new(bus.subscriber());
            let sink = log.clone();
            assert!(manager.sub(Tag::B, move |_: &EventB| sink.record("tagged")));

            assert_eq!(bus.publisher().publish(&EventB), 2);
            assert_eq!(log.drain(), vec!["direct", "tagged"]);
        }

        // Dropping the manager released only its own registration.
        assert_eq!(bus.publisher().publish(&EventB), 1);
        assert_eq!(log.drain(), vec!["direct"]);
        assert!(bus.subscriber().unsubscribe::<EventB>(direct));
    }

    #[test]
    fn test_declared_types_cover_whole_set() {
        let bus = EventBus::<ScenarioEvents>::new();
        let names: Vec<_> = bus
            .declared_types()
            .iter()
            .map(|ty| ty.short_name())
            .collect();
        assert_eq!(names, vec!["EventA", "EventB", "EventC", "EventD"]);
    }
}
