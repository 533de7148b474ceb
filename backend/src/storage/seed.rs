//! # Seed Data
//!
//! Stores start from whatever a [`SeedProvider`] hands them. [`SampleSeed`] is
//! the demo data set the dashboard ships with; [`EmptySeed`] starts every
//! store empty.

use chrono::NaiveDate;
use shared::{
    FeeClass, FeeKind, LaundryPaymentClass, LaundryService, LaundryTransaction, MonthlyPaymentRecord,
    PaymentMethod, PaymentStatus, Santri, ServiceStatus, TransactionStatus, UangSakuKind,
    UangSakuTransaction, User, UserRole,
};

/// Source of the initial records for every store
pub trait SeedProvider: Send + Sync {
    fn santri(&self) -> Vec<Santri> {
        Vec::new()
    }

    fn fee_classes(&self) -> Vec<FeeClass> {
        Vec::new()
    }

    fn laundry_services(&self) -> Vec<LaundryService> {
        Vec::new()
    }

    fn laundry_payment_classes(&self) -> Vec<LaundryPaymentClass> {
        Vec::new()
    }

    fn laundry_transactions(&self) -> Vec<LaundryTransaction> {
        Vec::new()
    }

    fn uang_saku_transactions(&self) -> Vec<UangSakuTransaction> {
        Vec::new()
    }

    fn users(&self) -> Vec<User> {
        Vec::new()
    }

    fn payment_records(&self) -> Vec<MonthlyPaymentRecord> {
        Vec::new()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EmptySeed;

impl SeedProvider for EmptySeed {}

#[derive(Debug, Clone, Copy, Default)]
pub struct SampleSeed;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

const SEED_TIMESTAMP: &str = "2024-01-01T08:00:00+07:00";

impl SeedProvider for SampleSeed {
    fn santri(&self) -> Vec<Santri> {
        use PaymentStatus::{BelumLunas, Lunas};

        let rows = [
            (1, "2024001", "Ahmad Fauzi", "X", Lunas, Lunas, date(2008, 3, 12), ServiceStatus::Active),
            (2, "2024002", "Siti Aminah", "X", Lunas, BelumLunas, date(2008, 7, 4), ServiceStatus::Active),
            (3, "2023001", "Muhammad Rizki", "XI", BelumLunas, Lunas, date(2007, 1, 23), ServiceStatus::Active),
            (4, "2023002", "Fatimah Zahra", "XI", Lunas, Lunas, date(2007, 9, 30), ServiceStatus::Active),
            (5, "2022001", "Abdullah Hakim", "XII", Lunas, BelumLunas, date(2006, 5, 18), ServiceStatus::Active),
            (6, "2022002", "Aisyah Putri", "XII", BelumLunas, BelumLunas, date(2006, 11, 2), ServiceStatus::Active),
            (7, "2024003", "Umar Faruq", "X", Lunas, Lunas, date(2008, 2, 14), ServiceStatus::Inactive),
            (8, "2023003", "Khadijah Nur", "XI", Lunas, Lunas, date(2007, 6, 9), ServiceStatus::Active),
        ];

        rows.into_iter()
            .map(|(id, nis, name, class_name, spp, syahriah, birth, status)| Santri {
                id,
                nis: nis.to_string(),
                name: name.to_string(),
                class_name: class_name.to_string(),
                spp_status: spp,
                syahriah_status: syahriah,
                email: Some(format!("{}@santri.pesantren.id", nis)),
                phone: Some(format!("08123456{}", &nis[3..])),
                address: Some("Jl. Pesantren No. 1, Kediri".to_string()),
                birth_date: Some(birth),
                status,
            })
            .collect()
    }

    fn fee_classes(&self) -> Vec<FeeClass> {
        [
            (1, FeeKind::Spp, "Class X", 150_000, 750_000),
            (2, FeeKind::Spp, "Class XI", 160_000, 800_000),
            (3, FeeKind::Spp, "Class XII", 175_000, 875_000),
            (4, FeeKind::Syahriah, "Class X", 100_000, 1_200_000),
            (5, FeeKind::Syahriah, "Class XI", 110_000, 1_320_000),
            (6, FeeKind::Syahriah, "Class XII", 120_000, 1_440_000),
        ]
        .into_iter()
        .map(|(id, kind, name, monthly, term_amount)| FeeClass {
            id,
            kind,
            name: name.to_string(),
            monthly,
            term_amount,
        })
        .collect()
    }

    fn laundry_services(&self) -> Vec<LaundryService> {
        [
            (1, "Cuci Reguler", "Cuci dan lipat pakaian harian", 5_000, "2 hari", "Cuci", ServiceStatus::Active),
            (2, "Cuci Setrika", "Cuci, setrika dan lipat", 7_000, "3 hari", "Cuci", ServiceStatus::Active),
            (3, "Dry Cleaning", "Untuk jas, gamis dan bahan khusus", 15_000, "4 hari", "Khusus", ServiceStatus::Active),
            (4, "Setrika Saja", "Setrika pakaian yang sudah bersih", 4_000, "1 hari", "Setrika", ServiceStatus::Inactive),
            (5, "Cuci Selimut & Bedcover", "Selimut, sprei dan bedcover", 12_000, "3 hari", "Khusus", ServiceStatus::Active),
        ]
        .into_iter()
        .map(|(id, name, description, price_per_kg, estimated_time, category, status)| LaundryService {
            id,
            name: name.to_string(),
            description: description.to_string(),
            price_per_kg,
            estimated_time: estimated_time.to_string(),
            category: category.to_string(),
            status,
        })
        .collect()
    }

    fn laundry_payment_classes(&self) -> Vec<LaundryPaymentClass> {
        [
            (1, "Paket Reguler", 75_000, 800_000),
            (2, "Paket Setrika", 100_000, 1_100_000),
            (3, "Paket Premium", 150_000, 1_650_000),
        ]
        .into_iter()
        .map(|(id, name, monthly_price, yearly_price)| LaundryPaymentClass {
            id,
            name: name.to_string(),
            monthly_price,
            yearly_price,
        })
        .collect()
    }

    fn laundry_transactions(&self) -> Vec<LaundryTransaction> {
        let santri = self.santri();
        let services = self.laundry_services();

        [
            (1, 1, 1, 3.0, date(2024, 1, 15), TransactionStatus::Completed, PaymentMethod::Cash),
            (2, 2, 2, 2.5, date(2024, 1, 16), TransactionStatus::Processing, PaymentMethod::Transfer),
            (3, 3, 3, 1.0, date(2024, 1, 17), TransactionStatus::Pending, PaymentMethod::UangSaku),
            (4, 4, 1, 4.0, date(2024, 1, 18), TransactionStatus::Pending, PaymentMethod::Cash),
        ]
        .into_iter()
        .filter_map(|(id, santri_id, service_id, weight_kg, date, status, payment_method)| {
            let student = santri.iter().find(|s| s.id == santri_id)?;
            let service = services.iter().find(|s| s.id == service_id)?;
            Some(LaundryTransaction {
                id,
                santri_id,
                santri_name: student.name.clone(),
                santri_class: student.class_name.clone(),
                service_id,
                service_name: service.name.clone(),
                weight_kg,
                total_price: (service.price_per_kg as f64 * weight_kg).round() as i64,
                date,
                status,
                payment_method,
            })
        })
        .collect()
    }

    fn uang_saku_transactions(&self) -> Vec<UangSakuTransaction> {
        let santri = self.santri();

        [
            (1, 1, "Kiriman orang tua", 200_000, UangSakuKind::Topup, TransactionStatus::Completed, date(2024, 1, 5)),
            (2, 1, "Jajan kantin", 50_000, UangSakuKind::Withdrawal, TransactionStatus::Completed, date(2024, 1, 10)),
            (3, 2, "Kiriman orang tua", 150_000, UangSakuKind::Topup, TransactionStatus::Completed, date(2024, 1, 6)),
            (4, 2, "Beli buku", 25_000, UangSakuKind::Withdrawal, TransactionStatus::Pending, date(2024, 1, 12)),
            (5, 3, "Kiriman orang tua", 100_000, UangSakuKind::Topup, TransactionStatus::Completed, date(2024, 1, 7)),
            (6, 3, "Jajan kantin", 30_000, UangSakuKind::Withdrawal, TransactionStatus::Cancelled, date(2024, 1, 11)),
        ]
        .into_iter()
        .filter_map(|(id, santri_id, description, amount, kind, status, date)| {
            let student = santri.iter().find(|s| s.id == santri_id)?;
            Some(UangSakuTransaction {
                id,
                santri_id,
                santri_name: student.name.clone(),
                description: description.to_string(),
                amount,
                kind,
                status,
                date,
            })
        })
        .collect()
    }

    fn users(&self) -> Vec<User> {
        [
            (1, "Admin Pesantren", "admin@pesantren.id", "081200000001", UserRole::Admin),
            (2, "Bendahara SMK", "bendahara.smk@pesantren.id", "081200000002", UserRole::BendaharaSmk),
            (3, "Bendahara SMP", "bendahara.smp@pesantren.id", "081200000003", UserRole::BendaharaSmp),
            (4, "Bendahara Pondok", "bendahara.pondok@pesantren.id", "081200000004", UserRole::BendaharaPondok),
        ]
        .into_iter()
        .map(|(id, name, email, phone, role)| User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            password: "password123".to_string(),
            phone: phone.to_string(),
            role,
            created_at: SEED_TIMESTAMP.to_string(),
            updated_at: SEED_TIMESTAMP.to_string(),
        })
        .collect()
    }

    fn payment_records(&self) -> Vec<MonthlyPaymentRecord> {
        let first_months = |count: usize| {
            let mut months = [false; 12];
            months.iter_mut().take(count).for_each(|m| *m = true);
            months
        };

        vec![
            MonthlyPaymentRecord {
                santri_id: 1,
                kind: FeeKind::Spp,
                paid_months: first_months(6),
                yearly_payment: false,
            },
            MonthlyPaymentRecord {
                santri_id: 1,
                kind: FeeKind::Syahriah,
                paid_months: [false; 12],
                yearly_payment: true,
            },
            MonthlyPaymentRecord {
                santri_id: 2,
                kind: FeeKind::Spp,
                paid_months: first_months(3),
                yearly_payment: false,
            },
            MonthlyPaymentRecord {
                santri_id: 4,
                kind: FeeKind::Spp,
                paid_months: [false; 12],
                yearly_payment: true,
            },
        ]
    }
}
