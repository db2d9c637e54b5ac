//! Populating records from named request parameters.
//!
//! The inverse of introspection: each field is looked up by its lowercase
//! column name in a [`ParamSource`] and, when a parameter is found, parsed and
//! assigned.
//!
//! - A missing parameter leaves the field unchanged.
//! - An `Option<T>` field receives `Some(parsed)`, or `None` for an empty
//!   parameter.
//! - A parameter that does not parse fails with [`BeanError::Inflate`].
//!
//! ```ignore
//! use beansql::{Record, inflate_new};
//! use std::collections::HashMap;
//!
//! let params = HashMap::from([("name".to_string(), "calo".to_string())]);
//! let bean: TestBean = inflate_new(&params)?;
//! ```

use crate::error::{BeanError, BeanResult};
use crate::value::ScalarField;
use std::collections::{BTreeMap, HashMap};

/// Named string parameters, e.g. the query string of a request.
pub trait ParamSource {
    fn get(&self, name: &str) -> Option<String>;
}

impl<S: std::hash::BuildHasher> ParamSource for HashMap<String, String, S> {
    fn get(&self, name: &str) -> Option<String> {
        HashMap::get(self, name).cloned()
    }
}

impl ParamSource for BTreeMap<String, String> {
    fn get(&self, name: &str) -> Option<String> {
        BTreeMap::get(self, name).cloned()
    }
}

impl ParamSource for [(&str, &str)] {
    fn get(&self, name: &str) -> Option<String> {
        self.iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| (*v).to_string())
    }
}

impl<const N: usize> ParamSource for [(&str, &str); N] {
    fn get(&self, name: &str) -> Option<String> {
        ParamSource::get(self.as_slice(), name)
    }
}

impl ParamSource for Vec<(String, String)> {
    fn get(&self, name: &str) -> Option<String> {
        self.iter().find(|(k, _)| k == name).map(|(_, v)| v.clone())
    }
}

impl<P: ParamSource + ?Sized> ParamSource for &P {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }
}

/// A [`ParamSource`] backed by a closure.
pub struct FnParams<F>(F);

impl<F> ParamSource for FnParams<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, name: &str) -> Option<String> {
        (self.0)(name)
    }
}

/// Wrap a lookup closure as a [`ParamSource`].
pub fn params_fn<F>(f: F) -> FnParams<F>
where
    F: Fn(&str) -> Option<String>,
{
    FnParams(f)
}

/// A record that can be populated from request parameters.
pub trait Inflate {
    /// Assign every field that has a matching parameter.
    fn inflate_from<P: ParamSource + ?Sized>(&mut self, params: &P) -> BeanResult<()>;
}

/// Populate an existing record and hand it back.
pub fn inflate<T: Inflate, P: ParamSource + ?Sized>(mut bean: T, params: &P) -> BeanResult<T> {
    bean.inflate_from(params)?;
    Ok(bean)
}

/// Populate a fresh `T::default()`.
pub fn inflate_new<T: Inflate + Default, P: ParamSource + ?Sized>(params: &P) -> BeanResult<T> {
    inflate(T::default(), params)
}

/// Parse one parameter into a field slot. Used by generated `Inflate` impls.
#[doc(hidden)]
pub fn assign_field<T: ScalarField, P: ParamSource + ?Sized>(
    slot: &mut T,
    column: &str,
    params: &P,
) -> BeanResult<()> {
    let Some(raw) = params.get(column) else {
        return Ok(());
    };
    match T::from_param(&raw) {
        Ok(v) => {
            *slot = v;
            Ok(())
        }
        Err(message) => Err(BeanError::inflate(column, raw, message)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Person {
        name: Option<String>,
        age: i32,
        member: bool,
    }

    impl Inflate for Person {
        fn inflate_from<P: ParamSource + ?Sized>(&mut self, params: &P) -> BeanResult<()> {
            assign_field(&mut self.name, "name", params)?;
            assign_field(&mut self.age, "age", params)?;
            assign_field(&mut self.member, "member", params)?;
            Ok(())
        }
    }

    #[test]
    fn inflate_from_map() {
        let params = HashMap::from([
            ("name".to_string(), "calo".to_string()),
            ("age".to_string(), "20".to_string()),
        ]);
        let p: Person = inflate_new(&params).unwrap();
        assert_eq!(
            p,
            Person {
                name: Some("calo".into()),
                age: 20,
                member: false
            }
        );
    }

    #[test]
    fn missing_params_leave_fields_unchanged() {
        let start = Person {
            name: Some("keep".into()),
            age: 7,
            member: true,
        };
        let p = inflate(start, &[("age", "8")]).unwrap();
        assert_eq!(p.name.as_deref(), Some("keep"));
        assert_eq!(p.age, 8);
        assert!(p.member);
    }

    #[test]
    fn empty_param_clears_option() {
        let start = Person {
            name: Some("old".into()),
            ..Person::default()
        };
        let p = inflate(start, &[("name", "")]).unwrap();
        assert_eq!(p.name, None);
    }

    #[test]
    fn parse_failure_names_the_field() {
        let err = inflate_new::<Person, _>(&[("age", "twenty")]).unwrap_err();
        match err {
            BeanError::Inflate { field, value, .. } => {
                assert_eq!(field, "age");
                assert_eq!(value, "twenty");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn closure_source() {
        let source = params_fn(|name| (name == "member").then(|| "true".to_string()));
        let p: Person = inflate_new(&source).unwrap();
        assert!(p.member);
        assert_eq!(p.age, 0);
    }
}
