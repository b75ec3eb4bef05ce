mod common;

use std::io::Cursor;

use roadroute_lib::{run_batch, BatchChannel, Error, LineEvent};

use common::{small_city_network, triangle_network, ScriptedChannel};

#[test]
fn triangle_request_streams_three_waypoints_with_acks() {
    let network = triangle_network();
    let mut channel = ScriptedChannel::lines(&["R 0 0 100000 100000", "A", "A", "A"]);

    let plan = run_batch(&network, &mut channel).expect("request answered");

    assert_eq!(plan.steps, vec![1, 2, 3]);
    assert_eq!(
        channel.written,
        vec!["N 3", "W (0,0)", "W (100000,0)", "W (100000,100000)", "E"]
    );
    assert_eq!(channel.remaining_input(), 0);
}

#[test]
fn each_waypoint_waits_for_its_own_ack() {
    let network = triangle_network();
    let input = "R 0 0 100000 100000\nA\nnope\n\nA\nA\n";
    let mut channel = BatchChannel::new(Cursor::new(input), Vec::new());

    run_batch(&network, &mut channel).expect("request answered");

    let output = String::from_utf8(channel.into_writer()).expect("ascii output");
    assert_eq!(output, "N 3\nW (0,0)\nW (100000,0)\nW (100000,100000)\nE\n");
}

#[test]
fn unreachable_destination_reports_empty_path() {
    let network = small_city_network();
    // Snaps to 12 and 10; nothing leads back from 12.
    let mut channel = ScriptedChannel::lines(&["R 5350000 -11300000 5350000 -11350000"]);

    let plan = run_batch(&network, &mut channel).expect("request answered");

    assert!(plan.is_empty());
    assert_eq!(channel.written, vec!["N 0", "E"]);
}

#[test]
fn request_points_are_snapped_to_nearest_vertices() {
    let network = small_city_network();
    let mut channel = ScriptedChannel::lines(&[
        "R 5351000 -11349000 5349000 -11301000",
        "A",
        "A",
        "A",
    ]);

    let plan = run_batch(&network, &mut channel).expect("request answered");

    assert_eq!(plan.start, 10);
    assert_eq!(plan.goal, 12);
    assert_eq!(
        channel.written,
        vec![
            "N 3",
            "W (5350000,-11350000)",
            "W (5350000,-11325000)",
            "W (5350000,-11300000)",
            "E",
        ]
    );
}

#[test]
fn invalid_request_writes_nothing() {
    let network = triangle_network();
    let mut channel = ScriptedChannel::lines(&["Q 0 0 100000 100000"]);

    let error = run_batch(&network, &mut channel).expect_err("not an R request");

    assert!(matches!(error, Error::MalformedRequest { .. }));
    assert!(channel.written.is_empty());
}

#[test]
fn closing_before_all_acks_is_an_error() {
    let network = triangle_network();
    let mut channel = ScriptedChannel::lines(&["R 0 0 100000 100000", "A"]);

    let error = run_batch(&network, &mut channel).expect_err("second ack never arrives");

    assert!(matches!(
        error,
        Error::ChannelClosed {
            expected: "acknowledgment"
        }
    ));
    assert_eq!(channel.written, vec!["N 3", "W (0,0)", "W (100000,0)"]);
}

#[test]
fn timeouts_while_waiting_for_ack_keep_waiting() {
    let network = triangle_network();
    let mut channel = ScriptedChannel::new([
        LineEvent::line("R 0 0 100000 0"),
        LineEvent::Timeout,
        LineEvent::line("A"),
        LineEvent::line("A"),
    ]);

    let plan = run_batch(&network, &mut channel).expect("request answered");
    assert_eq!(plan.steps, vec![1, 2]);
    assert_eq!(channel.written, vec!["N 2", "W (0,0)", "W (100000,0)", "E"]);
}

#[test]
fn empty_input_is_reported_as_closed() {
    let network = triangle_network();
    let mut channel = ScriptedChannel::default();

    let error = run_batch(&network, &mut channel).expect_err("no request");
    assert!(matches!(error, Error::ChannelClosed { expected: "request" }));
}

#[test]
fn extreme_request_coordinates_snap_without_overflow() {
    let network = triangle_network();
    let mut channel = ScriptedChannel::lines(&["R -9223372036854775808 0 0 0", "A"]);

    let plan = run_batch(&network, &mut channel).expect("request answered");

    assert_eq!(plan.steps, vec![1]);
    assert_eq!(channel.written, vec!["N 1", "W (0,0)", "E"]);
}
