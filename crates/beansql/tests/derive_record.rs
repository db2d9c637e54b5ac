#![allow(dead_code)]

use beansql::{
    Entity, Inflate, Record, SqlBuilder, StatementKind, Value, build_delete, build_delete_template,
    build_insert, build_insert_template, build_select, build_select_template, build_update,
    build_update_template, inflate, inflate_new,
};
use std::collections::HashMap;

#[derive(Debug, Default, Clone, PartialEq, Record)]
struct TestBean {
    name: Option<String>,
    age: i32,
    id: i64,
}

#[derive(Debug, Default, Record)]
#[bean(table = "people")]
struct Person {
    #[bean(id)]
    person_id: i32,
    #[bean(column = "FullName")]
    full_name: Option<String>,
    member: Option<bool>,
    #[bean(skip)]
    cache: Vec<u8>,
}

#[derive(Debug, Default, Record)]
struct SearchFilter {
    city: Option<String>,
    min_age: u8,
}

fn calo() -> TestBean {
    TestBean {
        name: Some("calo".into()),
        age: 20,
        id: 22,
    }
}

#[test]
fn derived_record_builds_every_statement() {
    let bean = calo();
    assert_eq!(
        build_select(&bean).unwrap(),
        "select name,age,id from testbean where 1=1 and name='calo' and age=20 and id=22"
    );
    assert_eq!(
        build_insert(&bean).unwrap(),
        "insert into testbean(name,age,id) values('calo',20,22)"
    );
    assert_eq!(
        build_update(&bean).unwrap(),
        "update testbean set name='calo',age=20 where id=22"
    );
    assert_eq!(
        build_delete(&bean).unwrap(),
        "delete from testbean where id= 22"
    );
}

#[test]
fn derived_record_builds_templates() {
    let bean = calo();
    assert_eq!(
        build_select_template(&bean).unwrap(),
        "select name,age,id from testbean where 1=1 and name=? and age=? and id=?"
    );
    assert_eq!(
        build_insert_template(&bean).unwrap(),
        "insert into testbean(name,age,id) values(?,?,?)"
    );
    assert_eq!(
        build_update_template(&bean).unwrap(),
        "update testbean set name=?,age=? where id=?"
    );
    assert_eq!(
        build_delete_template(&bean).unwrap(),
        "delete from testbean where id= ?"
    );
}

#[test]
fn derived_metadata() {
    let bean = calo();
    assert_eq!(bean.type_name(), "TestBean");
    assert_eq!(bean.table_name(), "testbean");
    assert_eq!(bean.id_column(), "id");
    assert_eq!(bean.id().unwrap(), 22);

    let names: Vec<String> = bean
        .field_values()
        .unwrap()
        .into_iter()
        .map(|f| f.name)
        .collect();
    assert_eq!(names, ["name", "age", "id"]);
}

#[test]
fn attributes_rename_skip_and_mark_key() {
    let person = Person {
        person_id: 7,
        full_name: Some("Ann Lee".into()),
        member: Some(false),
        cache: vec![1, 2, 3],
    };
    assert_eq!(person.table_name(), "people");
    assert_eq!(person.id_column(), "person_id");
    assert_eq!(
        build_update(&person).unwrap(),
        "update people set fullname='Ann Lee',member=false where person_id=7"
    );
    assert_eq!(
        build_delete(&person).unwrap(),
        "delete from people where person_id= 7"
    );
}

#[test]
fn keyless_record_supports_select() {
    let filter = SearchFilter {
        city: Some("Oslo".into()),
        min_age: 0,
    };
    assert_eq!(
        build_select(&filter).unwrap(),
        "select city from searchfilter where 1=1 and city='Oslo'"
    );
}

#[test]
fn inflate_new_from_request_params() {
    let params = HashMap::from([
        ("name".to_string(), "chen".to_string()),
        ("age".to_string(), "31".to_string()),
    ]);
    let bean: TestBean = inflate_new(&params).unwrap();
    assert_eq!(
        bean,
        TestBean {
            name: Some("chen".into()),
            age: 31,
            id: 0,
        }
    );
    assert_eq!(
        build_insert(&bean).unwrap(),
        "insert into testbean(name,age) values('chen',31)"
    );
}

#[test]
fn inflate_uses_lowercase_column_names() {
    let mut person = Person::default();
    person
        .inflate_from(&[("fullname", "Bo"), ("person_id", "3"), ("cache", "x")])
        .unwrap();
    assert_eq!(person.full_name.as_deref(), Some("Bo"));
    assert_eq!(person.person_id, 3);
    assert!(person.cache.is_empty());
}

#[test]
fn inflate_existing_keeps_unmatched_fields() {
    let bean = inflate(calo(), &[("age", "21")]).unwrap();
    assert_eq!(bean.name.as_deref(), Some("calo"));
    assert_eq!(bean.age, 21);
    assert_eq!(bean.id, 22);
}

#[test]
fn inflate_reports_unparsable_values() {
    let err = inflate_new::<TestBean, _>(&[("id", "abc")]).unwrap_err();
    assert!(err.is_inflate());
    assert!(err.to_string().contains("'id'"));
}

#[test]
fn strict_builder_rejects_unsaved_records() {
    let fresh = TestBean {
        name: Some("new".into()),
        ..TestBean::default()
    };
    let strict = SqlBuilder::strict();
    for kind in [StatementKind::Update, StatementKind::Delete] {
        for template in [false, true] {
            assert!(
                strict
                    .build(kind, template, &fresh)
                    .unwrap_err()
                    .is_invalid_state()
            );
        }
    }
    assert!(strict.insert(&fresh).is_ok());
    assert!(strict.select(&fresh).is_ok());
}

#[test]
fn template_params_follow_placeholders() {
    let builder = SqlBuilder::new();
    let bean = calo();
    for kind in StatementKind::ALL {
        let stmt = builder.build(kind, true, &bean).unwrap();
        assert_eq!(stmt.placeholder_count(), stmt.params.len(), "{kind}");
    }
    let stmt = builder.update_template(&bean).unwrap();
    assert_eq!(
        stmt.params,
        vec![Value::from("calo"), Value::Int32(20), Value::Int64(22)]
    );
}
