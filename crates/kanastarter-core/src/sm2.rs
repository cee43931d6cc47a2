// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The SM-2 family update rule.

use crate::types::quality::Quality;

pub type Ease = f64;

/// Interval in whole days.
pub type Interval = u32;

pub const INITIAL_EASE: Ease = 2.5;
pub const MIN_EASE: Ease = 1.3;

/// Ease lost on a failed answer.
const FAILURE_PENALTY: Ease = 0.2;

/// Reviews needed before an item can be mastered.
pub const MASTERY_MIN_REVIEWS: u32 = 5;

/// Accuracy needed for mastery.
pub const MASTERY_ACCURACY: f64 = 0.8;

/// Reviews needed before an item can be weak.
pub const WEAK_MIN_REVIEWS: u32 = 2;

/// Accuracy below which an item is weak.
pub const WEAK_ACCURACY: f64 = 0.7;

/// Ease after a successful answer.
pub fn ease_after_success(ease: Ease, q: Quality) -> Ease {
    let miss: f64 = f64::from(Quality::MAX) - f64::from(q);
    f64::max(MIN_EASE, ease + (0.1 - miss * (0.08 + miss * 0.02)))
}

/// Ease after a failed answer.
pub fn ease_after_failure(ease: Ease) -> Ease {
    f64::max(MIN_EASE, ease - FAILURE_PENALTY)
}

/// Interval after a successful answer, using the ease from before the answer.
pub fn interval_after_success(interval: Interval, ease: Ease) -> Interval {
    match interval {
        0 => 1,
        1 => 6,
        i => (f64::from(i) * ease).round() as Interval,
    }
}

/// Fraction of correct answers. `None` before the first review.
pub fn accuracy(correct: u32, reviews: u32) -> Option<f64> {
    if reviews == 0 {
        None
    } else {
        Some(f64::from(correct) / f64::from(reviews))
    }
}

pub fn is_mastered(correct: u32, reviews: u32) -> bool {
    reviews >= MASTERY_MIN_REVIEWS
        && accuracy(correct, reviews).is_some_and(|a| a >= MASTERY_ACCURACY)
}

pub fn is_weak(correct: u32, reviews: u32) -> bool {
    reviews >= WEAK_MIN_REVIEWS && accuracy(correct, reviews).is_some_and(|a| a < WEAK_ACCURACY)
}
