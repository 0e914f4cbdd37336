use std::io::{self, Write};

use courier_optimizer::simulation::{MileageReport, SimulationContext};

pub fn run(context: &SimulationContext) {
    println!(
        "{}",
        crate::display::mileage_table(&context.mileage_report(), context.trucks())
    );
}

/// Mileage lines shown when the prompt starts.
pub fn write_mileage<W: Write>(output: &mut W, report: &MileageReport) -> io::Result<()> {
    writeln!(output, "Parcel Service")?;
    writeln!(output, "Total mileage for each truck:")?;
    for truck in &report.trucks {
        writeln!(output, "Truck {} mileage: {:.2} miles", truck.truck_id, truck.mileage)?;
    }
    writeln!(output, "Overall total mileage: {:.2} miles", report.total)
}

#[cfg(test)]
mod tests {
    use courier_optimizer::{problem::miles::Miles, problem::truck::TruckId, simulation::TruckMileage};

    use super::*;

    #[test]
    fn test_write_mileage() {
        let report = MileageReport {
            trucks: vec![
                TruckMileage {
                    truck_id: TruckId::new(1),
                    mileage: Miles::new(22.2),
                },
                TruckMileage {
                    truck_id: TruckId::new(2),
                    mileage: Miles::new(27.1),
                },
            ],
            total: Miles::new(49.3),
        };
        let mut output = Vec::new();

        write_mileage(&mut output, &report).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Parcel Service\n\
             Total mileage for each truck:\n\
             Truck 1 mileage: 22.20 miles\n\
             Truck 2 mileage: 27.10 miles\n\
             Overall total mileage: 49.30 miles\n"
        );
    }
}
