//! UI service dispatch tests
//!
//! Exercise the public call interface the way a monitor's callers do:
//! raw opcode numbers in, register-style results out.

use uicall::constants::*;
use uicall::ui::{SingleContext, SpinLocked};
use uicall::{DisplayMode, Field, Opcode, Reply, Status, TerminalState, UiDispatcher, UiError};

const DEFINED: [u8; 13] = [
    RETURN,
    GET_FG,
    GET_BG,
    GET_CURSOR_ROW,
    GET_CURSOR_COL,
    GET_CURSOR_ROW_MAX,
    GET_CURSOR_COL_MAX,
    SET_FG,
    SET_BG,
    SET_CURSOR_ROW,
    SET_CURSOR_COL,
    SET_CURSOR_ROW_MAX,
    SET_CURSOR_COL_MAX,
];

fn read_all<S: uicall::ui::Serialization>(d: &UiDispatcher<S>) -> Vec<u64> {
    Field::ALL
        .iter()
        .map(|&f| {
            d.dispatch(Opcode::getter(f).code() as u64, None)
                .unwrap()
                .value()
                .unwrap()
        })
        .collect()
}

#[test]
fn test_boot_scenario_inclusive_max() {
    // fg=7, bg=0, row=0, col=0, row_max=24, col_max=79
    let d: UiDispatcher = UiDispatcher::new(TerminalState::default());
    assert_eq!(read_all(&d), vec![7, 0, 0, 0, 24, 79]);

    let err = d.dispatch(SET_CURSOR_ROW as u64, Some(25)).unwrap_err();
    assert_eq!(err.status(), Status::InvalidArgument);

    assert_eq!(d.dispatch(SET_CURSOR_ROW as u64, Some(24)), Ok(Reply::Done));
    assert_eq!(d.dispatch(SET_CURSOR_ROW as u64, Some(23)), Ok(Reply::Done));
    assert_eq!(d.dispatch(GET_CURSOR_ROW as u64, None), Ok(Reply::Value(23)));
}

#[test]
fn test_every_undefined_opcode_is_unknown() {
    let d: UiDispatcher = UiDispatcher::default();
    d.dispatch(SET_CURSOR_ROW as u64, Some(10)).unwrap();
    d.dispatch(SET_CURSOR_COL as u64, Some(20)).unwrap();
    let before = read_all(&d);

    let wide = [0x100u64, 0x111, 0x1_0000_0011, u64::MAX];
    let undefined = (0u64..=0xFF)
        .filter(|raw| !DEFINED.contains(&(*raw as u8)))
        .chain(wide);

    for raw in undefined {
        for arg in [None, Some(0), Some(5)] {
            assert_eq!(
                d.dispatch(raw, arg),
                Err(UiError::UnknownOpcode { opcode: raw }),
                "opcode 0x{:x}",
                raw
            );
        }
    }
    assert_eq!(read_all(&d), before);
}

#[test]
fn test_out_of_range_initial_colors_never_reach_dispatcher() {
    let text = TerminalState::new(25, 80, DisplayMode::Text16);
    assert_eq!(text.with_colors(200, 99), None);
    assert_eq!(text.with_colors(16, 0), None);

    let d: UiDispatcher = UiDispatcher::new(text.with_colors(15, 0).unwrap());
    assert_eq!(d.dispatch(GET_FG as u64, None), Ok(Reply::Value(15)));
}

#[test]
fn test_getters_are_stable() {
    let d: UiDispatcher = UiDispatcher::default();
    d.dispatch(SET_BG as u64, Some(3)).unwrap();
    for field in Field::ALL {
        let op = Opcode::getter(field).code() as u64;
        assert_eq!(d.dispatch(op, None), d.dispatch(op, None));
    }
}

#[test]
fn test_resize_clamp() {
    let d: UiDispatcher = UiDispatcher::default();
    d.dispatch(SET_CURSOR_ROW_MAX as u64, Some(20)).unwrap();
    d.dispatch(SET_CURSOR_ROW as u64, Some(10)).unwrap();
    d.dispatch(SET_CURSOR_ROW_MAX as u64, Some(5)).unwrap();
    assert_eq!(d.get(Field::CursorRow), 5);
}

#[test]
fn test_cursor_invariant_over_call_sequence() {
    let d: UiDispatcher = UiDispatcher::default();
    let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
    for _ in 0..10_000 {
        // xorshift64
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        let op = DEFINED[(seed % DEFINED.len() as u64) as usize];
        let arg = (seed >> 32) % 120;
        let _ = d.dispatch(op as u64, Some(arg));
        let s = d.snapshot();
        assert!(s.cursor_in_bounds(), "{:?}", s);
        assert!(s.mode().is_valid_color(s.fg_color() as u64));
        assert!(s.mode().is_valid_color(s.bg_color() as u64));
    }
}

#[test]
fn test_rejected_setters_leave_state() {
    let d: UiDispatcher<SingleContext> = UiDispatcher::new(
        TerminalState::new(25, 80, DisplayMode::Indexed256)
            .with_colors(200, 17)
            .unwrap(),
    );
    let before = read_all(&d);
    assert!(d.dispatch(SET_FG as u64, Some(256)).is_err());
    assert!(d.dispatch(SET_BG as u64, None).is_err());
    assert!(d.dispatch(SET_CURSOR_COL as u64, Some(80)).is_err());
    assert!(d.dispatch(SET_CURSOR_COL_MAX as u64, Some(1 << 40)).is_err());
    assert_eq!(read_all(&d), before);
}

#[test]
fn test_spin_locked_shared_between_threads() {
    let d: UiDispatcher<SpinLocked> = UiDispatcher::default();
    std::thread::scope(|scope| {
        scope.spawn(|| {
            for i in 0..2_000u64 {
                let _ = d.dispatch(SET_CURSOR_ROW_MAX as u64, Some(i % 30));
            }
        });
        scope.spawn(|| {
            for i in 0..2_000u64 {
                let _ = d.dispatch(SET_CURSOR_ROW as u64, Some(i % 30));
            }
        });
        scope.spawn(|| {
            for _ in 0..2_000 {
                assert!(d.snapshot().cursor_in_bounds());
            }
        });
    });
    assert!(d.snapshot().cursor_in_bounds());
}

#[test]
fn test_script_end_to_end() {
    let d: UiDispatcher = UiDispatcher::default();
    let calls = uicall::script::parse(
        "SET_CURSOR_ROW 25\nSET_CURSOR_ROW 23\nGET_CURSOR_ROW\nRETURN\nGET_FG\n",
    )
    .unwrap();
    let outcomes = uicall::script::run(&d, &calls);
    let rendered: Vec<String> = outcomes.iter().map(|o| o.render()).collect();
    assert_eq!(rendered, vec!["2", "0", "0 23", "0"]);
}
