use super::*;

#[derive(Default)]
struct Poller {
    scheduler: Scheduler<Poller>,
    runs: usize,
    remaining: usize,
}

fn scheduler_of(ctx: &mut Poller) -> &mut Scheduler<Poller> {
    &mut ctx.scheduler
}

const MS: u64 = 1_000_000;

#[test]
fn first_run_waits_for_the_first_poll_then_follows_interval() {
    let mut poller = Poller {
        remaining: 10,
        ..Poller::default()
    };
    poller.scheduler.schedule_repeating(
        Duration::from_millis(300),
        |ctx: &mut Poller| ctx.runs += 1,
        |_| false,
    );
    assert_eq!(poller.runs, 0);
    assert_eq!(poller.scheduler.next_due_nanos(), Some(0));

    assert_eq!(run_due(&mut poller, 5 * MS, scheduler_of), 1);
    assert_eq!(poller.runs, 1);

    assert_eq!(run_due(&mut poller, 200 * MS, scheduler_of), 0);
    assert_eq!(run_due(&mut poller, 305 * MS, scheduler_of), 1);
    assert_eq!(poller.runs, 2);
    assert_eq!(poller.scheduler.next_due_nanos(), Some(605 * MS));
}

#[test]
fn task_releases_itself_once_stop_predicate_holds() {
    let mut poller = Poller {
        remaining: 3,
        ..Poller::default()
    };
    let id = poller.scheduler.schedule_repeating(
        Duration::from_millis(300),
        |ctx: &mut Poller| {
            ctx.runs += 1;
            ctx.remaining -= 1;
        },
        |ctx| ctx.remaining == 0,
    );

    let mut now = 0;
    for _ in 0..10 {
        run_due(&mut poller, now, scheduler_of);
        now += 300 * MS;
    }

    assert_eq!(poller.runs, 3);
    assert!(!poller.scheduler.is_scheduled(id));
    assert!(poller.scheduler.is_empty());
}

#[test]
fn cancel_from_inside_action_drops_the_task() {
    struct SelfCancelling {
        scheduler: Scheduler<SelfCancelling>,
        id: Option<TaskId>,
        runs: usize,
    }

    let mut ctx = SelfCancelling {
        scheduler: Scheduler::new(),
        id: None,
        runs: 0,
    };
    let id = ctx.scheduler.schedule_repeating(
        Duration::from_millis(10),
        |ctx: &mut SelfCancelling| {
            ctx.runs += 1;
            if let Some(id) = ctx.id {
                assert!(ctx.scheduler.cancel(id));
            }
        },
        |_| false,
    );
    ctx.id = Some(id);

    run_due(&mut ctx, 0, |ctx| &mut ctx.scheduler);
    run_due(&mut ctx, 100 * MS, |ctx| &mut ctx.scheduler);

    assert_eq!(ctx.runs, 1);
    assert!(ctx.scheduler.is_empty());
}

#[test]
fn cancel_all_releases_pending_tasks() {
    let mut poller = Poller::default();
    let first = poller
        .scheduler
        .schedule_repeating(Duration::from_millis(5), |_| {}, |_| false);
    let second = poller
        .scheduler
        .schedule_repeating(Duration::from_millis(7), |_| {}, |_| false);
    assert_eq!(poller.scheduler.len(), 2);
    assert_ne!(first, second);

    poller.scheduler.cancel_all();

    assert!(poller.scheduler.is_empty());
    assert_eq!(run_due(&mut poller, 0, scheduler_of), 0);
}
