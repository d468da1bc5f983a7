pub mod test_util;
mod test_scenarios;
