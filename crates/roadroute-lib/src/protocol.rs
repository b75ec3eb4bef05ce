//! Request/acknowledge/response protocol for route queries.
//!
//! # Vocabulary
//!
//! ```text
//! client -> server   R <startLat> <startLon> <endLat> <endLon>   (batch request)
//! client -> server   R                                          (streaming request)
//! either direction   A                                          (acknowledgment)
//! server -> client   N <count>                                  (path length)
//! server -> client   W (<lat>,<lon>)                            (one waypoint)
//! server -> client   E                                          (end of response)
//! ```
//!
//! The streaming transport is driven by [`advance`], a pure transition
//! function over [`SessionState`]; [`StreamingEngine`] feeds it lines from a
//! [`Channel`] and performs the route computation when a session reaches
//! [`SessionState::Process`]. The batch transport ([`run_batch`]) is the same
//! exchange without the handshake, but with one acknowledgment per waypoint.

use std::fmt;
use std::thread;

use tracing::{debug, info, info_span, warn};

use crate::channel::{Channel, LineEvent};
use crate::config::TransportConfig;
use crate::error::{Error, Result};
use crate::network::{Coordinate, RoadNetwork};
use crate::routing::{plan_route, RoutePlan, RouteQuery};

/// Request tag.
pub const REQUEST: &str = "R";
/// Acknowledgment line.
pub const ACK: &str = "A";
/// End-of-response line.
pub const END: &str = "E";

/// State of one streaming session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    WaitOnRequest,
    WaitOnAck,
    ReceiveData,
    /// Coordinates received; the route has yet to be computed and sent.
    Process(RouteQuery),
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            SessionState::WaitOnRequest => "wait_on_request",
            SessionState::WaitOnAck => "wait_on_ack",
            SessionState::ReceiveData => "receive_data",
            SessionState::Process(_) => "process",
        };
        f.write_str(value)
    }
}

/// Result of feeding one input event to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: SessionState,
    /// Line to send back before moving on, if any.
    pub reply: Option<&'static str>,
}

impl Transition {
    fn to(next: SessionState) -> Self {
        Self { next, reply: None }
    }

    fn reply(next: SessionState, reply: &'static str) -> Self {
        Self {
            next,
            reply: Some(reply),
        }
    }
}

/// Compute the next session state for `event`.
///
/// Any timeout, closed channel or unexpected line outside of
/// [`SessionState::ReceiveData`] resets the session to
/// [`SessionState::WaitOnRequest`]. [`SessionState::Process`] consumes no
/// input and is returned unchanged.
pub fn advance(state: &SessionState, event: &LineEvent) -> Transition {
    let line = match event {
        LineEvent::Line(line) => line.trim(),
        LineEvent::Timeout | LineEvent::Closed => {
            return match state {
                SessionState::Process(_) => Transition::to(state.clone()),
                _ => Transition::to(SessionState::WaitOnRequest),
            };
        }
    };

    match state {
        SessionState::WaitOnRequest if line == REQUEST => {
            Transition::reply(SessionState::WaitOnAck, ACK)
        }
        SessionState::WaitOnAck if line == ACK => {
            Transition::reply(SessionState::ReceiveData, ACK)
        }
        SessionState::ReceiveData => match parse_coordinates(line) {
            Some(query) => Transition::to(SessionState::Process(query)),
            None => {
                warn!(line, "discarding malformed coordinate line");
                Transition::to(SessionState::WaitOnRequest)
            }
        },
        SessionState::Process(_) => Transition::to(state.clone()),
        SessionState::WaitOnRequest | SessionState::WaitOnAck => {
            Transition::to(SessionState::WaitOnRequest)
        }
    }
}

/// Parse a batch request line `R <startLat> <startLon> <endLat> <endLon>`.
pub fn parse_request(line: &str) -> Result<RouteQuery> {
    let malformed = || Error::MalformedRequest {
        line: line.to_string(),
    };
    let mut tokens = line.split_whitespace();
    if tokens.next() != Some(REQUEST) {
        return Err(malformed());
    }
    let values = tokens
        .map(str::parse::<i64>)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| malformed())?;
    match values.as_slice() {
        &[start_lat, start_lon, dest_lat, dest_lon] => {
            Ok(RouteQuery::new(start_lat, start_lon, dest_lat, dest_lon))
        }
        _ => Err(malformed()),
    }
}

/// Parse four integer coordinates, skipping a leading non-numeric tag.
pub fn parse_coordinates(line: &str) -> Option<RouteQuery> {
    let mut tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() == 5 && tokens[0].parse::<i64>().is_err() {
        tokens.remove(0);
    }
    match tokens.as_slice() {
        &[a, b, c, d] => Some(RouteQuery::new(
            a.parse().ok()?,
            b.parse().ok()?,
            c.parse().ok()?,
            d.parse().ok()?,
        )),
        _ => None,
    }
}

/// `N <count>` header line.
pub fn count_line(plan: &RoutePlan) -> String {
    format!("N {}", plan.steps.len())
}

/// `W (<lat>,<lon>)` waypoint line.
pub fn waypoint_line(coordinate: &Coordinate) -> String {
    format!("W ({},{})", coordinate.lat, coordinate.lon)
}

/// Serve a single batch request.
///
/// Reads one request line, answers with `N`, then sends each `W` line and
/// waits for an `A` before the next one, and closes with `E`. Lines other
/// than `A` received while waiting are ignored.
pub fn run_batch<C: Channel + ?Sized>(
    network: &RoadNetwork,
    channel: &mut C,
) -> Result<RoutePlan> {
    let line = match channel.read_line()? {
        LineEvent::Line(line) => line,
        LineEvent::Timeout | LineEvent::Closed => {
            return Err(Error::ChannelClosed {
                expected: "request",
            })
        }
    };
    let query = parse_request(&line)?;
    let plan = plan_route(network, &query)?;

    channel.write_line(&count_line(&plan))?;
    for waypoint in &plan.waypoints {
        channel.write_line(&waypoint_line(waypoint))?;
        await_ack(channel)?;
    }
    channel.write_line(END)?;

    info!(
        start = plan.start,
        goal = plan.goal,
        waypoints = plan.steps.len(),
        "answered batch request"
    );
    Ok(plan)
}

fn await_ack<C: Channel + ?Sized>(channel: &mut C) -> Result<()> {
    loop {
        match channel.read_line()? {
            LineEvent::Line(line) if line.trim() == ACK => return Ok(()),
            LineEvent::Line(line) => debug!(line = %line, "waiting for acknowledgment"),
            LineEvent::Timeout => debug!("still waiting for acknowledgment"),
            LineEvent::Closed => {
                return Err(Error::ChannelClosed {
                    expected: "acknowledgment",
                })
            }
        }
    }
}

/// Drives streaming sessions over a [`Channel`].
pub struct StreamingEngine<'a> {
    network: &'a RoadNetwork,
    config: TransportConfig,
}

impl<'a> StreamingEngine<'a> {
    pub fn new(network: &'a RoadNetwork, config: TransportConfig) -> Self {
        Self { network, config }
    }

    /// Run sessions until the channel closes, returning how many requests
    /// were answered.
    pub fn run<C: Channel + ?Sized>(&self, channel: &mut C) -> Result<usize> {
        let mut state = SessionState::WaitOnRequest;
        let mut answered = 0;

        loop {
            state = match state {
                SessionState::Process(query) => {
                    let span = info_span!("session", request = answered + 1);
                    let _guard = span.enter();
                    self.respond(channel, &query)?;
                    answered += 1;
                    SessionState::WaitOnRequest
                }
                waiting => {
                    let event = channel.read_line()?;
                    if event == LineEvent::Closed {
                        debug!(answered, "channel closed");
                        return Ok(answered);
                    }
                    let transition = advance(&waiting, &event);
                    if let Some(reply) = transition.reply {
                        channel.write_line(reply)?;
                    }
                    if transition.next != waiting {
                        debug!(from = %waiting, to = %transition.next, "session transition");
                    }
                    transition.next
                }
            };
        }
    }

    fn respond<C: Channel + ?Sized>(&self, channel: &mut C, query: &RouteQuery) -> Result<()> {
        let plan = plan_route(self.network, query)?;

        if !self.config.response_delay.is_zero() {
            thread::sleep(self.config.response_delay);
        }

        channel.write_line(&count_line(&plan))?;
        for waypoint in &plan.waypoints {
            channel.write_line(&waypoint_line(waypoint))?;
        }
        channel.write_line(END)?;

        info!(
            start = plan.start,
            goal = plan.goal,
            waypoints = plan.steps.len(),
            "answered streaming request"
        );
        Ok(())
    }
}
