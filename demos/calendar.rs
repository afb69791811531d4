use sovran_tups::successor::{next_day, next_month};
use sovran_tups::{tup, StartFinish, SuperDict, TupList, TupsError, Value};

fn main() -> Result<(), TupsError> {
    // Months in which each vehicle was booked, sorted by vehicle then month
    let bookings = TupList::from(vec![
        ("car", "2018-11"),
        ("car", "2018-12"),
        ("car", "2019-01"),
        ("car", "2019-04"),
        ("van", "2019-01"),
        ("van", "2019-02"),
    ]);

    let spans = bookings.to_start_finish(&StartFinish::new().successor(next_month))?;
    for span in spans.iter() {
        println!("booked: {}", span);
    }

    // Maintenance days, one record per (vehicle, day, crew)
    let maintenance = TupList::from(vec![
        ("car", "2019-02-27", "north"),
        ("car", "2019-02-28", "north"),
        ("car", "2019-03-01", "north"),
        ("car", "2019-03-02", "south"),
    ]);
    let stops = maintenance.to_start_finish(&StartFinish::new().successor(next_day))?;
    println!("maintenance: {}", stops.head());

    // Months per vehicle, with empty entries for vehicles never booked
    let months = bookings.to_dict_list(&[1])?;
    let fleet = months.fill_with_default([Value::from("truck")], TupList::new());
    let counts = fleet.to_lendict()?;
    println!("months booked: {}", counts.head());
    println!("in use: {:?}", fleet.clean().keys_l());

    // Composite keys as nested levels and back
    let by_vehicle_month: SuperDict<Value, Value> = bookings
        .iter()
        .map(|&(vehicle, month)| (Value::from(tup![vehicle, month]), Value::Bool(true)))
        .collect();
    let nested = by_vehicle_month.to_dictdict()?;
    println!("vehicles: {:?}", nested.keys_l());
    assert_eq!(nested.to_dictup(), by_vehicle_month);

    Ok(())
}
