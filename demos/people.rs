use sovran_tups::{Pivot, SuperDict, TupList, TupsError, Value};

fn main() -> Result<(), TupsError> {
    // (name, birthyear, sex, height)
    let people = TupList::from(vec![
        ("Alex", 1980, "M", 175),
        ("Bernard", 1955, "M", 164),
        ("Chloe", 1995, "F", 178),
        ("Daniel", 2010, "M", 131),
        ("Ellen", 1968, "F", 158),
    ]);

    // Adult males in 2021
    let adult_males = people
        .filter(|(_, _, sex, _)| *sex == "M")
        .filter(|(_, year, _, _)| *year <= 2003);
    println!("adult males: {}", adult_males.head());

    println!("names and birthyears: {}", adult_males.take(&[0, 1])?.head());
    println!("names: {}", adult_males.take_one(0)?.head());

    let ages = people.vapply(|_: &str, year: i32, _: &str, _: i32| 2021 - year);
    println!("ages: {}", ages.head());

    let youngest_first = people.sorted_by_key(|(_, year, _, _)| *year, true).take_one(0)?;
    println!("youngest first: {}", youngest_first.head());

    // Height by (birthyear, sex), then every height per sex
    let heights = people.pivot(&Pivot::new(&[1, 2], &[3]))?;
    println!("height by birthyear and sex: {}", heights.head());

    let heights_by_sex = people.pivot_list(&Pivot::new(&[2], &[3]))?;
    for (sex, list) in heights_by_sex.iter() {
        println!("heights for {}: {}", sex, list.head());
    }

    let by_name = people.index_by(&[0])?;
    println!("Chloe: {:?}", by_name[&Value::from("Chloe")]);

    // The same data as a mapping of property mappings
    let records: SuperDict<&str, SuperDict<&str, Value>> = people
        .iter()
        .map(|&(name, year, sex, height)| {
            let props = SuperDict::from([
                ("birthyear", Value::from(year)),
                ("sex", Value::from(sex)),
                ("height", Value::from(height)),
            ]);
            (name, props)
        })
        .collect();

    println!("heights: {}", records.get_property(&"height").head());

    let by_sex = records.index_by_property(&"sex")?;
    for (sex, group) in by_sex.iter() {
        println!("{}: {:?}", sex, group.keys_l());
    }

    Ok(())
}
