//! Mock seed data
//!
//! Demo records loaded into every store at startup; nothing here is
//! persisted, so each process starts from the same state. Ids are
//! fixed small numbers so demo flows and tests can reference them.

use shared::models::*;
use shared::util::now_millis;

pub fn clients() -> Vec<Client> {
    let now = now_millis();
    vec![
        Client {
            id: 1,
            name: "María García".to_string(),
            phone: Some("612 345 678".to_string()),
            email: Some("maria.garcia@example.com".to_string()),
            address: Some("C/ Mayor 12, Madrid".to_string()),
            status: ClientStatus::Active,
            pets: vec![
                Pet {
                    id: 11,
                    name: "Luna".to_string(),
                    breed: Some("Caniche".to_string()),
                    age: Some(4),
                    weight: Some(6.5),
                    color: Some("Blanco".to_string()),
                    notes: None,
                },
                Pet {
                    id: 12,
                    name: "Rocky".to_string(),
                    breed: Some("Bulldog francés".to_string()),
                    age: Some(2),
                    weight: Some(11.0),
                    color: Some("Atigrado".to_string()),
                    notes: Some("Alergia al pollo".to_string()),
                },
            ],
            visit_count: 14,
            last_visit_at: Some(now),
            created_at: now,
            updated_at: now,
        },
        Client {
            id: 2,
            name: "Carlos Ruiz".to_string(),
            phone: Some("699 111 222".to_string()),
            email: None,
            address: None,
            status: ClientStatus::Active,
            pets: vec![Pet {
                id: 21,
                name: "Toby".to_string(),
                breed: Some("Beagle".to_string()),
                age: Some(7),
                weight: Some(13.2),
                color: Some("Tricolor".to_string()),
                notes: None,
            }],
            visit_count: 3,
            last_visit_at: None,
            created_at: now,
            updated_at: now,
        },
    ]
}

pub fn cages() -> Vec<Cage> {
    let now = now_millis();
    let mut cages = Vec::new();
    let sizes = [
        (CageSize::Small, "P"),
        (CageSize::Medium, "M"),
        (CageSize::Large, "G"),
    ];
    let mut id = 100;
    for (size, prefix) in sizes {
        for n in 1..=3 {
            id += 1;
            cages.push(Cage {
                id,
                number: format!("{}-{:02}", prefix, n),
                size,
                status: CageStatus::Available,
                location: Some("Sala pensión".to_string()),
                notes: None,
                created_at: now,
                updated_at: now,
            });
        }
    }
    // One unit out of service
    if let Some(last) = cages.last_mut() {
        last.status = CageStatus::Maintenance;
        last.notes = Some("Puerta floja, pendiente de arreglo".to_string());
    }
    cages
}

pub fn appointments() -> Vec<Appointment> {
    let now = now_millis();
    vec![
        Appointment {
            id: 301,
            client_id: 1,
            pet_id: 11,
            service: "Baño y corte".to_string(),
            date: "2026-09-02".to_string(),
            time: "10:00".to_string(),
            status: AppointmentStatus::Confirmed,
            price: 35.0,
            notes: None,
            created_at: now,
            updated_at: now,
        },
        Appointment {
            id: 302,
            client_id: 2,
            pet_id: 21,
            service: "Corte de uñas".to_string(),
            date: "2026-09-03".to_string(),
            time: "17:30".to_string(),
            status: AppointmentStatus::Pending,
            price: 12.0,
            notes: Some("Primera visita del año".to_string()),
            created_at: now,
            updated_at: now,
        },
    ]
}

pub fn coupons() -> Vec<Coupon> {
    let now = now_millis();
    vec![
        Coupon {
            id: 401,
            code: "BIENVENIDO20".to_string(),
            description: Some("20% de descuento para clientes nuevos".to_string()),
            discount_type: DiscountType::Percent,
            value: 20.0,
            status: CouponStatus::Active,
            times_used: 8,
            max_uses: Some(100),
            valid_until: Some("2026-12-31".to_string()),
            created_at: now,
            updated_at: now,
        },
        Coupon {
            id: 402,
            code: "VERANO15".to_string(),
            description: Some("Promoción de verano".to_string()),
            discount_type: DiscountType::Percent,
            value: 15.0,
            status: CouponStatus::Paused,
            times_used: 23,
            max_uses: None,
            valid_until: Some("2026-09-15".to_string()),
            created_at: now,
            updated_at: now,
        },
    ]
}

pub fn campaigns() -> Vec<Campaign> {
    let now = now_millis();
    vec![Campaign {
        id: 501,
        name: "Vuelta al cole".to_string(),
        channel: CampaignChannel::Whatsapp,
        status: CampaignStatus::Running,
        budget: 150.0,
        sent: 240,
        opened: 96,
        redeemed: 12,
        start_date: Some("2026-08-20".to_string()),
        end_date: Some("2026-09-10".to_string()),
        notes: None,
        created_at: now,
        updated_at: now,
    }]
}

pub fn invoices() -> Vec<Invoice> {
    let now = now_millis();
    let items = vec![InvoiceItem {
        description: "Pensión 3 noches".to_string(),
        quantity: 3.0,
        unit_price: 25.0,
    }];
    let subtotal: f64 = items.iter().map(|i| i.amount()).sum();
    let tax = subtotal * 0.21;
    vec![Invoice {
        id: 601,
        number: "FAC-2026-0001".to_string(),
        client_id: 1,
        items,
        subtotal,
        tax_rate: 21.0,
        tax,
        total: subtotal + tax,
        status: InvoiceStatus::Sent,
        issue_date: "2026-08-01".to_string(),
        due_date: Some("2026-08-31".to_string()),
        notes: None,
        created_at: now,
        updated_at: now,
    }]
}

pub fn sales() -> Vec<Sale> {
    let now = now_millis();
    vec![Sale {
        id: 701,
        ticket_number: 1,
        client_id: Some(2),
        items: vec![SaleItem {
            name: "Champú hipoalergénico".to_string(),
            quantity: 1,
            unit_price: 14.9,
        }],
        subtotal: 14.9,
        discount: 0.0,
        coupon_code: None,
        total: 14.9,
        payment_method: PaymentMethod::Cash,
        created_at: now,
    }]
}

pub fn shareable_content() -> Vec<ShareableContent> {
    let now = now_millis();
    vec![ShareableContent {
        id: 801,
        title: "Antes y después: Luna".to_string(),
        body: "¡Mirad qué cambio! Luna lista para el verano ☀️".to_string(),
        platform: SharePlatform::Instagram,
        status: ShareStatus::Draft,
        image_url: None,
        shared_at: None,
        created_at: now,
        updated_at: now,
    }]
}

pub fn settings() -> BusinessSettings {
    BusinessSettings {
        business_name: "Patitas Pet Spa".to_string(),
        address: Some("Av. de la Constitución 44, Sevilla".to_string()),
        phone: Some("954 000 111".to_string()),
        email: Some("hola@patitas.example".to_string()),
        tax_id: Some("B-12345678".to_string()),
        schedule: Some("L-V 9:00-19:00, S 10:00-14:00".to_string()),
        receipt_footer: Some("¡Gracias por su visita!".to_string()),
        default_pension_rate: 25.0,
        default_tax_rate: 21.0,
        updated_at: now_millis(),
    }
}
