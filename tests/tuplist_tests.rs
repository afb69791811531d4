use pretty_assertions::assert_eq;
use sovran_tups::{successor, tup, StartFinish, Tup, TupList, TupsError, Value};

fn test_tup() -> TupList<Tup> {
    TupList::from_tuples(vec![
        ("a", "b", "c", 1),
        ("a", "b", "c", 2),
        ("a", "b", "c", 3),
        ("r", "b", "c", 1),
        ("r", "b", "c", 2),
        ("r", "b", "c", 3),
    ])
}

#[test]
fn test_add_and_add_all() {
    let mut tl = TupList::new();
    tl.add(tup!["b", "t", "3", 5]);
    tl.add_all(vec![tup!["x"], tup!["y"]]).add(tup!["z"]);
    assert_eq!(tl.len(), 4);
    assert_eq!(tl.first(), Some(&tup!["b", "t", "3", 5]));
    assert_eq!(tl.last(), Some(&tup!["z"]));
}

#[test]
fn test_apply_and_vapply() {
    let tl = TupList::from(vec![("a", 1), ("b", 2)]);

    let swapped = tl.apply(|(s, n)| (*n, *s));
    assert_eq!(swapped.to_list(), vec![(1, "a"), (2, "b")]);

    let joined = tl.vapply(|s: &str, n: i32| format!("{}:{}", s, n));
    assert_eq!(joined.to_list(), vec!["a:1".to_string(), "b:2".to_string()]);

    let indexed = tl.kvapply(|i, (s, _)| (i, *s));
    assert_eq!(indexed.to_list(), vec![(0, "a"), (1, "b")]);
}

#[test]
fn test_filter() {
    let tl = test_tup();
    let small = tl.filter(|t| t[3] == Value::Int(1));
    assert_eq!(small.to_list(), vec![tup!["a", "b", "c", 1], tup!["r", "b", "c", 1]]);

    assert_eq!(tl.filter(|_| true), tl);
    assert!(tl.filter(|_| false).is_empty());
}

#[test]
fn test_filter_list_f() -> Result<(), TupsError> {
    let tl = test_tup();

    let picked = tl.filter_list_f(&[0, 3], &[Value::from("r"), Value::Int(2)])?;
    assert_eq!(picked.to_list(), vec![tup!["r", "b", "c", 2]]);

    // positions past the end never match
    assert!(tl.filter_list_f(&[9], &[Value::Int(1)])?.is_empty());

    let err = tl.filter_list_f(&[0, 1], &[Value::from("a")]).unwrap_err();
    assert!(err.is_shape_mismatch());
    Ok(())
}

#[test]
fn test_take() -> Result<(), TupsError> {
    let tl = test_tup();
    let pairs = tl.take(&[0, 2])?;
    assert_eq!(pairs[0], tup!["a", "c"]);
    assert_eq!(pairs.len(), 6);

    let last = tl.take_one(3)?;
    assert_eq!(
        last.to_list(),
        vec![1, 2, 3, 1, 2, 3].into_iter().map(Value::Int).collect::<Vec<_>>()
    );

    assert!(tl.take(&[4]).unwrap_err().is_shape_mismatch());
    Ok(())
}

#[test]
fn test_intersect() {
    let a = TupList::from(vec![(1, 2), (3, 4), (5, 6)]);
    let b = TupList::from(vec![(3, 4), (5, 6), (7, 8)]);
    assert_eq!(a.intersect(&b).to_list(), vec![(3, 4), (5, 6)]);

    let reversed = TupList::from(vec![(5, 6), (3, 4)]);
    assert_eq!(a.intersect(&reversed).to_list(), vec![(3, 4), (5, 6)]);

    assert_eq!(a.set_diff(&b).to_list(), vec![(1, 2)]);
}

#[test]
fn test_unique() -> Result<(), TupsError> {
    let pairs = test_tup().take(&[0, 1])?;
    let once = pairs.unique();
    assert_eq!(once.to_list(), vec![tup!["a", "b"], tup!["r", "b"]]);
    assert_eq!(once.unique(), once);

    let ints = TupList::from(vec![3, 1, 3, 2, 1]);
    assert_eq!(ints.unique().to_list(), vec![3, 1, 2]);
    Ok(())
}

#[test]
fn test_unique2_by_prefix() {
    let tl = test_tup();
    assert_eq!(
        tl.unique2(1).to_list(),
        vec![tup!["a", "b", "c", 1], tup!["r", "b", "c", 1]]
    );
    assert_eq!(tl.unique2(4), tl);
    assert_eq!(tl.unique_by(|t| t[3].clone()).len(), 3);
}

#[test]
fn test_to_columns() -> Result<(), TupsError> {
    let tl = TupList::from(vec![("a", 1), ("b", 2)]);
    let cols = tl.to_columns()?;
    assert_eq!(cols[0], vec![Value::from("a"), Value::from("b")]);
    assert_eq!(cols[1], vec![Value::Int(1), Value::Int(2)]);

    let ragged = TupList::from(vec![tup!["a", 1], tup!["b"]]);
    assert!(ragged.to_columns().unwrap_err().is_shape_mismatch());
    Ok(())
}

#[test]
fn test_sorting() {
    let tl = TupList::from(vec![("b", 2), ("a", 3), ("c", 1)]);
    assert_eq!(tl.sorted().to_list(), vec![("a", 3), ("b", 2), ("c", 1)]);
    assert_eq!(
        tl.sorted_by_key(|(_, n)| *n, true).to_list(),
        vec![("a", 3), ("b", 2), ("c", 1)]
    );
    assert_eq!(tl.to_set().len(), 3);
}

#[test]
fn test_to_dict() -> Result<(), TupsError> {
    let tl = test_tup();

    let lists = tl.to_dict_list(&[3])?;
    assert_eq!(lists.len(), 2);
    assert_eq!(
        lists[&Value::from(tup!["a", "b", "c"])].to_list(),
        vec![Value::Int(1), Value::Int(2), Value::Int(3)]
    );

    let scalars = tl.to_dict(&[3])?;
    assert_eq!(scalars[&Value::from(tup!["r", "b", "c"])], Value::Int(3));

    let grouped = tl.take(&[0, 1])?.to_dict_list(&[1])?;
    assert_eq!(grouped[&Value::from("a")].to_list(), vec![Value::from("b"); 3]);

    Ok(())
}

#[test]
fn test_to_dict_example() -> Result<(), TupsError> {
    let tl = TupList::from(vec![("g1", "x", 1), ("g1", "y", 2), ("g2", "x", 3)]);
    let d = tl.to_dict(&[2])?;
    assert_eq!(d.len(), 3);
    assert_eq!(d[&Value::from(tup!["g1", "x"])], Value::Int(1));
    assert_eq!(d[&Value::from(tup!["g1", "y"])], Value::Int(2));
    assert_eq!(d[&Value::from(tup!["g2", "x"])], Value::Int(3));
    Ok(())
}

#[test]
fn test_to_dict_shape_errors() {
    let ragged = TupList::from(vec![tup!["a", 1], tup!["b", 2, 3]]);
    assert!(ragged.to_dict(&[1]).unwrap_err().is_shape_mismatch());

    let tl = TupList::from(vec![("a", 1)]);
    assert!(tl.to_dict(&[2]).unwrap_err().is_shape_mismatch());
    assert!(tl.to_dict(&[0, 1]).unwrap_err().is_shape_mismatch());

    assert!(TupList::<Tup>::new().to_dict(&[1]).unwrap().is_empty());
}

#[test]
fn test_to_start_finish() -> Result<(), TupsError> {
    let tl = TupList::from(vec![
        ("A", 1),
        ("A", 2),
        ("A", 3),
        ("A", 5),
        ("B", 10),
        ("B", 11),
    ]);
    let runs = tl.to_start_finish(&StartFinish::default())?;
    assert_eq!(
        runs.to_list(),
        vec![tup!["A", 1, 3], tup!["A", 5, 5], tup!["B", 10, 11]]
    );
    Ok(())
}

#[test]
fn test_to_start_finish_group_change_breaks_run() -> Result<(), TupsError> {
    // "B" 4 follows "A" 3 numerically but belongs to another group
    let tl = TupList::from(vec![("A", 2), ("A", 3), ("B", 4)]);
    let runs = tl.to_start_finish(&StartFinish::new())?;
    assert_eq!(runs.to_list(), vec![tup!["A", 2, 3], tup!["B", 4, 4]]);
    Ok(())
}

#[test]
fn test_to_start_finish_on_projected_columns() -> Result<(), TupsError> {
    let tl = test_tup().take(&[0, 3])?;
    let runs = tl.to_start_finish(&StartFinish::new().period(1))?;
    assert_eq!(runs.to_list(), vec![tup!["a", 1, 3], tup!["r", 1, 3]]);
    Ok(())
}

#[test]
fn test_to_start_finish_wider_records() -> Result<(), TupsError> {
    let tl = TupList::from(vec![
        ("car", 1, "red"),
        ("car", 2, "red"),
        ("car", 3, "blue"),
    ]);
    let runs = tl.to_start_finish(&StartFinish::new().period(1))?;
    assert_eq!(
        runs.to_list(),
        vec![tup!["car", 1, "red", 2], tup!["car", 3, "blue", 3]]
    );
    Ok(())
}

#[test]
fn test_to_start_finish_months() -> Result<(), TupsError> {
    let tl = TupList::from(vec![
        ("plane", "2018-11"),
        ("plane", "2018-12"),
        ("plane", "2019-01"),
        ("plane", "2019-03"),
    ]);
    let runs = tl.to_start_finish(&StartFinish::new().successor(successor::next_month))?;
    assert_eq!(
        runs.to_list(),
        vec![
            tup!["plane", "2018-11", "2019-01"],
            tup!["plane", "2019-03", "2019-03"],
        ]
    );
    Ok(())
}

#[test]
fn test_to_start_finish_errors() {
    let single = TupList::from(vec![(1,)]);
    assert!(single
        .to_start_finish(&StartFinish::default())
        .unwrap_err()
        .is_shape_mismatch());

    let pairs = TupList::from(vec![("a", 1)]);
    assert!(pairs
        .to_start_finish(&StartFinish::new().period(2))
        .unwrap_err()
        .is_shape_mismatch());

    assert!(TupList::<Tup>::new()
        .to_start_finish(&StartFinish::default())
        .unwrap()
        .is_empty());
}

#[test]
fn test_to_start_finish_custom_join() -> Result<(), TupsError> {
    let tl = TupList::from(vec![
        ("A", 1),
        ("A", 2),
        ("A", 3),
        ("A", 5),
        ("B", 10),
        ("B", 11),
    ]);
    // (group, start, finish, number of periods)
    let options = StartFinish::new().join(|run: &[Tup]| {
        let first = &run[0];
        let last = &run[run.len() - 1];
        tup![first[0].clone(), first[1].clone(), last[1].clone(), run.len() as i64]
    });
    let runs = tl.to_start_finish(&options)?;
    assert_eq!(
        runs.to_list(),
        vec![tup!["A", 1, 3, 3], tup!["A", 5, 5, 1], tup!["B", 10, 11, 2]]
    );
    Ok(())
}

#[test]
fn test_slice() {
    let tl = test_tup();
    assert_eq!(
        tl.slice(..2).to_list(),
        vec![tup!["a", "b", "c", 1], tup!["a", "b", "c", 2]]
    );
    assert_eq!(tl.slice(4..).len(), 2);
    assert_eq!(tl.slice(1..=2).take_one(3).unwrap().to_list(), vec![Value::Int(2), Value::Int(3)]);
    // out-of-range bounds clamp to the list
    assert_eq!(tl.slice(5..99).to_list(), vec![tup!["r", "b", "c", 3]]);
    assert!(tl.slice(9..).is_empty());
    assert!(tl.slice(4..2).is_empty());
}

#[test]
fn test_float_records() -> Result<(), TupsError> {
    let tl = TupList::from(vec![("a", 1.5), ("b", 2.0)]);
    let d = tl.to_dict(&[1])?;
    assert_eq!(d[&Value::from("a")], Value::Float(1.5));
    assert_eq!(d.to_tuplist().to_list(), vec![tup!["a", 1.5], tup!["b", 2.0]]);
    assert_eq!(tl.filter_list_f(&[1], &[Value::from(2.0)])?.to_list(), vec![("b", 2.0)]);
    Ok(())
}
