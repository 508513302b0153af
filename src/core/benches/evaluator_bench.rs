//! Evaluator benchmarks. Run with: cargo bench --bench evaluator_bench
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tenderdesk_core::rbac::{get_user_permissions, has_all_permissions, has_any_permission, has_permission, Permission, Role, User};
fn vendor() -> User { User::new("vendor").with_role(Role::Vendor).with_permission(Permission::TenderRead) }
fn many_roles() -> User { User::new("many").with_roles(Role::ALL.iter().copied().filter(|r| *r != Role::SuperAdmin)).with_raw_role("NOT_A_ROLE") }
fn bench_single_checks(c: &mut Criterion) {
    let mut g = c.benchmark_group("evaluator_single");
    let v = vendor();
    g.bench_function("direct_hit", |b| b.iter(|| black_box(has_permission(Some(&v), black_box(Permission::TenderRead)))));
    g.bench_function("role_hit", |b| b.iter(|| black_box(has_permission(Some(&v), black_box(Permission::BidWithdraw)))));
    g.bench_function("miss", |b| b.iter(|| black_box(has_permission(Some(&v), black_box(Permission::AdminSettings)))));
    g.bench_function("no_user", |b| b.iter(|| black_box(has_permission(None, black_box(Permission::TenderRead)))));
    g.finish();
}
fn bench_set_checks(c: &mut Criterion) {
    let mut g = c.benchmark_group("evaluator_sets");
    let m = many_roles();
    g.bench_function("any_catalog", |b| b.iter(|| black_box(has_any_permission(Some(&m), Permission::ALL))));
    g.bench_function("all_catalog", |b| b.iter(|| black_box(has_all_permissions(Some(&m), Permission::ALL))));
    g.bench_function("effective_permissions", |b| b.iter(|| black_box(get_user_permissions(Some(&m)))));
    g.finish();
}
criterion_group!(benches, bench_single_checks, bench_set_checks);
criterion_main!(benches);
