use crate::errors::InternalError;
use crate::stores::Storage;
use crate::types::entities::{InsertResident, ResidentSource};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::json;

/// Seed the resident registry. Runs once at startup; the registry is
/// immutable afterwards.
pub async fn seed_residents(storage: &dyn Storage) -> Result<(), InternalError> {
    let residents = [
        InsertResident {
            name: "Ion Popescu".to_string(),
            resident_id: "MD2304981".to_string(),
            address: "Str. Ștefan cel Mare 42, Chișinău".to_string(),
            registration_date: registered(2022, 6, 15),
            source: ResidentSource::Internal,
            data: Some(json!({ "phone": "+373 69 123 456", "email": "ipopescu@mail.md" })),
        },
        InsertResident {
            name: "Maria Ionescu".to_string(),
            resident_id: "MD2309875".to_string(),
            address: "Str. București 23, Chișinău".to_string(),
            registration_date: registered(2022, 9, 20),
            source: ResidentSource::Internal,
            data: Some(json!({ "phone": "+373 69 987 654", "email": "mionescu@mail.md" })),
        },
        InsertResident {
            name: "Vasile Rusu".to_string(),
            resident_id: "MD2303451".to_string(),
            address: "Str. Alba Iulia 102, Chișinău".to_string(),
            registration_date: registered(2022, 3, 10),
            source: ResidentSource::Internal,
            data: Some(json!({ "phone": "+373 69 567 890", "email": "vrusu@mail.md" })),
        },
        InsertResident {
            name: "Ana Codreanu".to_string(),
            resident_id: "MD2308532".to_string(),
            address: "Str. Mihai Eminescu 18, Bălți".to_string(),
            registration_date: registered(2022, 2, 5),
            source: ResidentSource::External,
            data: Some(json!({ "phone": "+373 69 111 222", "email": "acodreanu@mail.md" })),
        },
        InsertResident {
            name: "Dumitru Moraru".to_string(),
            resident_id: "MD2307764".to_string(),
            address: "Str. Decebal 45, Cahul".to_string(),
            registration_date: registered(2022, 4, 25),
            source: ResidentSource::External,
            data: Some(json!({ "phone": "+373 69 333 444", "email": "dmoraru@mail.md" })),
        },
        InsertResident {
            name: "Elena Lungu".to_string(),
            resident_id: "MD2301298".to_string(),
            address: "Str. Independenței 78, Ungheni".to_string(),
            registration_date: registered(2022, 8, 8),
            source: ResidentSource::External,
            data: Some(json!({ "phone": "+373 69 555 666", "email": "elungu@mail.md" })),
        },
    ];

    for resident in residents {
        storage.create_resident(resident).await?;
    }
    tracing::debug!("resident registry seeded");
    Ok(())
}

fn registered(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| Utc.from_utc_datetime(&dt))
        .unwrap_or_else(Utc::now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::MemStorage;

    #[tokio::test]
    async fn test_seed_inserts_both_registries() {
        let storage = MemStorage::new();
        seed_residents(&storage).await.unwrap();

        let all = storage.get_residents(None).await.unwrap();
        assert_eq!(all.len(), 6);

        let internal = storage
            .get_residents(Some(ResidentSource::Internal))
            .await
            .unwrap();
        assert_eq!(internal.len(), 3);

        let external = storage
            .get_residents(Some(ResidentSource::External))
            .await
            .unwrap();
        assert_eq!(external.len(), 3);
    }
}
