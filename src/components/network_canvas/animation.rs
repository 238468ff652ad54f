//! Hop-by-hop packet animation.
//!
//! The controller is a step function. Each call to [`AnimationController::advance`]
//! does one unit of work (one frame, or the transition after a settle pause)
//! and says when it wants to be resumed. The caller owns the actual timer and
//! passes back the [`Ticket`] it was given; tickets from a superseded run are
//! rejected, so stale timers fire harmlessly.

use std::time::Duration;

use super::types::{NodeId, Path};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationParameters {
	/// Frames per hop; progress advances by `1 / steps_per_hop` each frame.
	pub steps_per_hop: u32,
	/// Pause after a hop reaches its destination.
	pub settle_delay: Duration,
}

impl Default for AnimationParameters {
	fn default() -> Self {
		Self {
			steps_per_hop: 50,
			settle_delay: Duration::from_millis(300),
		}
	}
}

/// Generation token for one submitted path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HopFrame {
	pub hop: usize,
	pub from: NodeId,
	pub to: NodeId,
	pub progress: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Resume {
	NextFrame,
	After(Duration),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
	/// Render `frame`, then call `advance` again as `resume` says.
	Frame { frame: HopFrame, resume: Resume },
	/// Every hop is done. Reported once per run.
	Completed,
	/// The ticket is outdated or the run already finished; nothing changed.
	Stale,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
	Idle,
	Hop { index: usize, tick: u32 },
	Done,
}

#[derive(Debug)]
pub struct AnimationController {
	params: AnimationParameters,
	path: Path,
	phase: Phase,
	generation: u64,
	current: Option<HopFrame>,
}

impl AnimationController {
	pub fn new(params: AnimationParameters) -> Self {
		Self {
			params: AnimationParameters {
				steps_per_hop: params.steps_per_hop.max(1),
				..params
			},
			path: Vec::new(),
			phase: Phase::Idle,
			generation: 0,
			current: None,
		}
	}

	/// Replaces whatever was running with `path`.
	pub fn start(&mut self, path: Path) -> Ticket {
		self.generation += 1;
		self.path = path;
		self.phase = Phase::Hop { index: 0, tick: 0 };
		self.current = None;
		Ticket(self.generation)
	}

	/// Invalidates outstanding tickets and drops the in-flight path.
	pub fn cancel(&mut self) {
		self.generation += 1;
		self.path.clear();
		self.phase = Phase::Idle;
		self.current = None;
	}

	pub fn is_running(&self) -> bool {
		matches!(self.phase, Phase::Hop { .. })
	}

	/// The frame most recently produced, for drawing between steps.
	pub fn current_frame(&self) -> Option<HopFrame> {
		self.current
	}

	pub fn advance(&mut self, ticket: Ticket) -> Step {
		if ticket.0 != self.generation {
			return Step::Stale;
		}
		let Phase::Hop { index, tick } = self.phase else {
			return Step::Stale;
		};
		if index + 1 >= self.path.len() {
			self.phase = Phase::Done;
			self.current = None;
			return Step::Completed;
		}

		let frame = HopFrame {
			hop: index,
			from: self.path[index],
			to: self.path[index + 1],
			progress: f64::from(tick) / f64::from(self.params.steps_per_hop),
		};
		self.current = Some(frame);

		let resume = if tick < self.params.steps_per_hop {
			self.phase = Phase::Hop {
				index,
				tick: tick + 1,
			};
			Resume::NextFrame
		} else {
			// the next increment would overshoot 1.0
			self.phase = Phase::Hop {
				index: index + 1,
				tick: 0,
			};
			Resume::After(self.params.settle_delay)
		};
		Step::Frame { frame, resume }
	}
}

impl Default for AnimationController {
	fn default() -> Self {
		Self::new(AnimationParameters::default())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn path(ids: &[u32]) -> Path {
		ids.iter().map(|&i| NodeId(i)).collect()
	}

	fn run_to_end(ctl: &mut AnimationController, ticket: Ticket) -> (Vec<HopFrame>, Vec<Resume>) {
		let mut frames = Vec::new();
		let mut resumes = Vec::new();
		loop {
			match ctl.advance(ticket) {
				Step::Frame { frame, resume } => {
					frames.push(frame);
					resumes.push(resume);
				}
				Step::Completed => return (frames, resumes),
				Step::Stale => panic!("run went stale"),
			}
		}
	}

	#[test]
	fn two_hops_in_order_then_completion() {
		let params = AnimationParameters::default();
		let mut ctl = AnimationController::new(params);
		let ticket = ctl.start(path(&[0, 3, 4]));
		let (frames, resumes) = run_to_end(&mut ctl, ticket);

		let per_hop = params.steps_per_hop as usize + 1;
		assert_eq!(frames.len(), 2 * per_hop);

		let (first, second) = frames.split_at(per_hop);
		assert!(first.iter().all(|f| f.from == NodeId(0) && f.to == NodeId(3)));
		assert!(second.iter().all(|f| f.from == NodeId(3) && f.to == NodeId(4)));

		for hop in [first, second] {
			assert_eq!(hop[0].progress, 0.0);
			assert!(hop.windows(2).all(|w| w[1].progress > w[0].progress));
			let last = hop[hop.len() - 1].progress;
			assert_eq!(last, 1.0);
			assert!(last + 1.0 / f64::from(params.steps_per_hop) > 1.0);
		}

		// a settle pause after each hop, frame ticks everywhere else
		let settles: Vec<usize> = resumes
			.iter()
			.enumerate()
			.filter(|(_, r)| **r == Resume::After(params.settle_delay))
			.map(|(i, _)| i)
			.collect();
		assert_eq!(settles, vec![per_hop - 1, 2 * per_hop - 1]);

		assert!(!ctl.is_running());
		assert_eq!(ctl.advance(ticket), Step::Stale);
	}

	#[test]
	fn completion_waits_for_last_settle() {
		let mut ctl = AnimationController::new(AnimationParameters {
			steps_per_hop: 2,
			settle_delay: Duration::from_millis(10),
		});
		let ticket = ctl.start(path(&[1, 2]));
		for _ in 0..2 {
			assert!(matches!(
				ctl.advance(ticket),
				Step::Frame {
					resume: Resume::NextFrame,
					..
				}
			));
		}
		assert!(matches!(
			ctl.advance(ticket),
			Step::Frame {
				resume: Resume::After(_),
				..
			}
		));
		assert!(ctl.is_running());
		assert_eq!(ctl.advance(ticket), Step::Completed);
		assert!(!ctl.is_running());
	}

	#[test]
	fn single_node_path_completes_immediately() {
		let mut ctl = AnimationController::default();
		let ticket = ctl.start(path(&[5]));
		assert_eq!(ctl.advance(ticket), Step::Completed);
	}

	#[test]
	fn restart_invalidates_previous_ticket() {
		let mut ctl = AnimationController::default();
		let old = ctl.start(path(&[0, 1, 2]));
		assert!(matches!(ctl.advance(old), Step::Frame { .. }));

		let new = ctl.start(path(&[2, 1]));
		assert_eq!(ctl.advance(old), Step::Stale);
		match ctl.advance(new) {
			Step::Frame { frame, .. } => {
				assert_eq!((frame.from, frame.to), (NodeId(2), NodeId(1)));
				assert_eq!(frame.progress, 0.0);
			}
			other => panic!("unexpected {other:?}"),
		}
	}

	#[test]
	fn cancel_discards_the_run() {
		let mut ctl = AnimationController::default();
		let ticket = ctl.start(path(&[0, 1]));
		ctl.advance(ticket);
		assert!(ctl.current_frame().is_some());

		ctl.cancel();
		assert_eq!(ctl.advance(ticket), Step::Stale);
		assert!(ctl.current_frame().is_none());
		assert!(!ctl.is_running());
	}
}
