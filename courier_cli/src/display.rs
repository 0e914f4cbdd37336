use comfy_table::{Table, presets::UTF8_FULL};
use courier_optimizer::{
    problem::{package::PackageStatus, truck::Truck},
    simulation::MileageReport,
    status::status_resolver::PackageSnapshot,
    utils::time::format_clock,
};

pub fn mileage_table(report: &MileageReport, trucks: &[Truck]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Truck", "Departure", "Completion", "Packages", "Mileage"]);

    for entry in &report.trucks {
        let truck = trucks.iter().find(|truck| truck.id() == entry.truck_id);
        let time = |time: Option<_>| time.map(format_clock).unwrap_or_else(|| String::from("-"));

        table.add_row(vec![
            format!("Truck {}", entry.truck_id),
            time(truck.and_then(Truck::departure_time)),
            time(truck.and_then(Truck::completion_time)),
            truck.map_or(0, |truck| truck.packages().len()).to_string(),
            format!("{:.2}", entry.mileage),
        ]);
    }

    table.add_row(vec![
        String::from("Total"),
        String::new(),
        String::new(),
        String::new(),
        format!("{:.2}", report.total),
    ]);

    table
}

pub fn package_table(snapshots: &[PackageSnapshot]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Id",
        "Address",
        "City",
        "Zip",
        "Deadline",
        "Weight",
        "Status",
        "Delivered",
        "Truck",
        "Notes",
    ]);

    for snapshot in snapshots {
        let package = &snapshot.package;
        table.add_row(vec![
            package.id().to_string(),
            package.address().to_owned(),
            package.city().to_owned(),
            package.zip().to_owned(),
            package.deadline().to_string(),
            format!("{}kg", package.weight_kg()),
            package.status().to_string(),
            package
                .delivery_time()
                .filter(|_| package.status() == PackageStatus::Delivered)
                .map(format_clock)
                .unwrap_or_default(),
            snapshot.truck.to_string(),
            package.notes().to_owned(),
        ]);
    }

    table
}
