mod thread_random;

pub use thread_random::ThreadRandom;
