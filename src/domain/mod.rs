//! Business rules for todo items, expressed as driving ports (what the API calls) and
//! driven ports (what the domain needs from storage).

pub mod todo;

#[cfg(test)]
mod test_util;
