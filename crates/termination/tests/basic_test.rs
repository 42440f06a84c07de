//! Integration tests for the term substrate

use termination::{
    fresh, ordering, variables, Chain, Constant, Function, HasVariables, Substitution, Term,
    TermError, Variable, VariablePool, Weight,
};

/// Build f(g(?x), f(?y, ?z)) from pool variables
fn sample_term(pool: &VariablePool) -> Term {
    let f = Function::new("f", 2).unwrap();
    let g = Function::new("g", 1).unwrap();
    let x = pool.get("x");
    let y = pool.get("y");
    let z = pool.get("z");
    f.apply([g.apply([&x]).unwrap(), f.apply([&y, &z]).unwrap()])
        .unwrap()
}

#[test]
fn test_rename_apart_with_fresh_variables() {
    let pool = VariablePool::new();
    let t = sample_term(&pool);

    let renaming: Substitution = t
        .variable_set()
        .into_iter()
        .map(|var| {
            let renamed = fresh(&var).expect("pool variables are pool-bound");
            (var, renamed)
        })
        .collect();
    let renamed = renaming.apply(&t);

    assert_eq!(renamed.to_string(), "f(g(?x#1), f(?y#1, ?z#1))");
    assert_eq!(renamed.size(), t.size());

    let original: Vec<&Variable> = variables(&t).collect();
    for var in variables(&renamed) {
        assert!(pool.is_issued_by(var));
        assert!(!original.contains(&var));
    }
}

#[test]
fn test_second_renaming_does_not_collide() {
    let pool = VariablePool::new();
    let t = sample_term(&pool);

    let rename = |term: &Term| -> Term {
        let renaming: Substitution = term
            .variable_set()
            .into_iter()
            .map(|var| (var.clone(), fresh(&var).unwrap()))
            .collect();
        renaming.apply(term)
    };

    let once = rename(&t);
    let twice = rename(&t);
    assert_ne!(once, twice);
    assert_eq!(twice.to_string(), "f(g(?x#2), f(?y#2, ?z#2))");
}

#[test]
fn test_compose_then_apply_matches_sequential_application() {
    let pool = VariablePool::new();
    let t = sample_term(&pool);
    let a = Term::from(Constant::new("a"));
    let h = Function::new("h", 1).unwrap();

    let inner: Substitution = vec![
        (pool.get("x"), h.apply([&pool.get("y")]).unwrap()),
        (pool.get("z"), a.clone()),
    ]
    .into_iter()
    .collect();
    let outer: Substitution = vec![(pool.get("y"), a.clone())].into_iter().collect();

    let composed = outer.compose(&inner);
    assert_eq!(composed.apply(&t), outer.apply(&inner.apply(&t)));
    assert_eq!(composed.apply(&t).to_string(), "f(g(h(a)), f(a, a))");
}

#[test]
fn test_subterm_replacement_and_invalid_position() {
    let pool = VariablePool::new();
    let t = sample_term(&pool);
    let b = Term::from(Constant::new("b"));

    let replaced = t.replace_at(&[1, 0], b.clone()).unwrap();
    assert_eq!(replaced.at(&[1, 0]).unwrap(), &b);
    assert_eq!(replaced.to_string(), "f(g(?x), f(b, ?z))");

    match t.at(&[0, 0, 0]) {
        Err(TermError::InvalidPosition { position }) => {
            assert_eq!(position.as_slice(), &[0, 0, 0]);
        }
        other => panic!("Expected invalid position, got {:?}", other),
    }
}

#[test]
fn test_weight_chain_over_terms() {
    let pool = VariablePool::new();
    let t = sample_term(&pool);
    let x = Term::from(pool.get("x"));
    let gx = t.at(&[0]).unwrap().clone();

    let by_weight = ordering(Weight::default());
    let by_depth = ordering(|term: &Term| term.depth());

    let first = by_weight(x);
    let second = by_weight(gx);
    let third = by_depth(t.clone());

    // weight(?x) < weight(g(?x)) < weight(t), then depth(t) >= depth(g(?x))
    let comparison = Chain::new(&first)
        .lt(&second)
        .lt(&third)
        .end(termination::Relation::GreaterOrEqual, second.value());
    assert!(comparison.holds());
}

#[test]
fn test_fresh_requires_pool_binding() {
    let loose = Variable::new("x");
    assert!(matches!(fresh(&loose), Err(TermError::NotPoolBound { .. })));

    let a = Term::from(Constant::new("a"));
    assert!(matches!(fresh(&a), Err(TermError::NotPoolBound { .. })));

    let pool = VariablePool::new();
    let issued = fresh(&Term::from(pool.get("x"))).unwrap();
    assert_eq!(issued.name(), "x");
    assert_eq!(issued.index(), Some(1));
}
