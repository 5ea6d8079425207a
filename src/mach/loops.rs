/*!
## Loop setup

`@loop : (start, stop, step) ~ it` validates its bounds and stores them as
three narrowed integer variables for the matching `@start`/`@end` block to
consume. The helper variables and the iterator survive the loop, so bounds
can be inspected afterwards; setting up the same iterator twice is a
duplicate error.
*/

use super::{SectionMemory, Val};
use crate::error;
use crate::lang::{literal, Error};

type Result<T> = std::result::Result<T, Error>;

pub(crate) fn option_name(iterator: &str, field: &str) -> String {
    format!("___LOOP___ENGINE___{}___{}___", iterator, field)
}

fn store_option(mem: &mut SectionMemory, key: String, val: Val) -> Result<()> {
    if mem.contains(&key) {
        return Err(error!(DuplicateVariable; "loop option already exists: {}", key));
    }
    mem.insert(&key, val)
}

pub fn setup(params: &[String], ret: &str, mem: &mut SectionMemory) -> Result<()> {
    if params.len() != 3 {
        return Err(error!(Parse; "loop() requires exactly 3 parameters (start, stop, step)"));
    }
    // the return address doubles as the iterator name
    if ret == "nullptr" || !mem.contains(ret) {
        return Err(error!(UnknownReturnAddress; "loop iterator '{}' doesn't exist", ret));
    }

    let mut bounds = [0i64; 3];
    for (slot, token) in bounds.iter_mut().zip(params) {
        let value = mem.resolve_token(token)?;
        if !literal::is_number(&value) {
            return Err(error!(BadLiteral; "'{}' is not a valid loop bound", value));
        }
        *slot = literal::parse_int(&value)?;
    }
    let [start, stop, step] = bounds;

    if step == 0 {
        return Err(error!(BadLoopBounds; "step must not be zero"));
    }
    if step > 0 && start > stop {
        return Err(error!(BadLoopBounds; "step > 0 but start > stop"));
    }
    if step < 0 && start < stop {
        return Err(error!(BadLoopBounds; "step < 0 but start < stop"));
    }

    store_option(mem, option_name(ret, "start"), Val::narrowest_int(start))?;
    store_option(mem, option_name(ret, "stop"), Val::narrowest_int(stop))?;
    store_option(mem, option_name(ret, "step"), Val::narrowest_int(step))?;
    Ok(())
}
