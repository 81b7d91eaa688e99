//! Record key generation
//!
//! Keys are 20 characters: the write time in milliseconds encoded in 8
//! characters of an alphabet whose byte order matches its digit order,
//! followed by 12 random characters. Keys therefore sort by creation time.
//! Two keys made in the same millisecond reuse the random part incremented
//! by one, which keeps a single generator strictly increasing.

use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

const PUSH_CHARS: &[u8; 64] =
    b"-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";

const TIME_LEN: usize = 8;
const RANDOM_LEN: usize = 12;

#[derive(Debug, Default)]
struct PushIdState {
    last_time: Option<u64>,
    last_random: [u8; RANDOM_LEN],
}

/// Generator of unique, time-ordered record keys
#[derive(Debug, Default)]
pub struct PushIdGenerator {
    state: Mutex<PushIdState>,
}

impl PushIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key for the current wall clock, `None` if the clock reads before 1970
    pub fn generate(&self) -> Option<String> {
        let now = SystemTime::now().duration_since(UNIX_EPOCH).ok()?;
        let millis = u64::try_from(now.as_millis()).ok()?;
        self.next_id(millis)
    }

    /// Key for an explicit timestamp in milliseconds.
    ///
    /// Returns `None` if the generator lock is poisoned.
    pub fn next_id(&self, now_ms: u64) -> Option<String> {
        let mut state = self.state.lock().ok()?;

        if state.last_time == Some(now_ms) {
            increment(&mut state.last_random);
        } else {
            let mut rng = rand::thread_rng();
            for digit in state.last_random.iter_mut() {
                *digit = rng.gen_range(0..64);
            }
            state.last_time = Some(now_ms);
        }

        let mut id = String::with_capacity(TIME_LEN + RANDOM_LEN);
        let mut time_chars = [0u8; TIME_LEN];
        let mut t = now_ms;
        for slot in time_chars.iter_mut().rev() {
            *slot = PUSH_CHARS[(t % 64) as usize];
            t /= 64;
        }
        id.extend(time_chars.iter().map(|&c| c as char));
        id.extend(state.last_random.iter().map(|&d| PUSH_CHARS[d as usize] as char));
        Some(id)
    }
}

/// Add one to a base-64 digit string, carrying right to left
fn increment(digits: &mut [u8; RANDOM_LEN]) {
    for digit in digits.iter_mut().rev() {
        if *digit == 63 {
            *digit = 0;
        } else {
            *digit += 1;
            return;
        }
    }
}
