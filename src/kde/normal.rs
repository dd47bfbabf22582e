//! Univariate and bivariate normal distribution functions.
//!
//! `norm_cdf` uses Hart's double-precision rational approximation;
//! `bvn_upper` follows Genz's BVNU algorithm (Drezner-Wesolowsky with
//! Gauss-Legendre quadrature).

use std::f64::consts::PI;

/// Standard normal cumulative distribution function.
pub fn norm_cdf(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    let z = x.abs();
    let tail = if z > 37.0 {
        0.0
    } else {
        let e = (-z * z / 2.0).exp();
        if z < 7.071_067_811_865_47 {
            let mut num = 3.526_249_659_989_11e-2 * z + 0.700_383_064_443_688;
            num = num * z + 6.373_962_203_531_65;
            num = num * z + 33.912_866_078_383;
            num = num * z + 112.079_291_497_871;
            num = num * z + 221.213_596_169_931;
            num = num * z + 220.206_867_912_376;
            let mut den = 8.838_834_764_831_84e-2 * z + 1.755_667_163_182_64;
            den = den * z + 16.064_177_579_207;
            den = den * z + 86.780_732_202_946_1;
            den = den * z + 296.564_248_779_674;
            den = den * z + 637.333_633_378_831;
            den = den * z + 793.826_512_519_948;
            den = den * z + 440.413_735_824_752;
            e * num / den
        } else {
            let mut b = z + 0.65;
            b = z + 4.0 / b;
            b = z + 3.0 / b;
            b = z + 2.0 / b;
            b = z + 1.0 / b;
            e / b / 2.506_628_274_631
        }
    };
    if x > 0.0 {
        1.0 - tail
    } else {
        tail
    }
}

/// Gauss-Legendre half-rule (abscissae in (0, 1), weights) for `n` = 6, 12, 20.
fn gauss_legendre(r: f64) -> (&'static [f64], &'static [f64]) {
    const W6: [f64; 3] = [0.171_324_492_379_170_5, 0.360_761_573_048_138_4, 0.467_913_934_572_690_4];
    const X6: [f64; 3] = [0.932_469_514_203_152_2, 0.661_209_386_466_264_7, 0.238_619_186_083_197_0];
    const W12: [f64; 6] = [
        0.047_175_336_386_511_77,
        0.106_939_325_995_318_3,
        0.160_078_328_543_346_4,
        0.203_167_426_723_065_9,
        0.233_492_536_538_354_7,
        0.249_147_045_813_402_9,
    ];
    const X12: [f64; 6] = [
        0.981_560_634_246_719_1,
        0.904_117_256_370_475_0,
        0.769_902_674_194_305_0,
        0.587_317_954_286_617_1,
        0.367_831_498_998_180_2,
        0.125_233_408_511_469_2,
    ];
    const W20: [f64; 10] = [
        0.017_614_007_139_152_12,
        0.040_601_429_800_386_94,
        0.062_672_048_334_109_06,
        0.083_276_741_576_704_75,
        0.101_930_119_817_240_4,
        0.118_194_531_961_518_4,
        0.131_688_638_449_176_6,
        0.142_096_109_318_382_1,
        0.149_172_986_472_603_7,
        0.152_753_387_130_725_9,
    ];
    const X20: [f64; 10] = [
        0.993_128_599_185_094_9,
        0.963_971_927_277_913_8,
        0.912_234_428_251_325_9,
        0.839_116_971_822_218_8,
        0.746_331_906_460_150_8,
        0.636_053_680_726_515_0,
        0.510_867_001_950_827_1,
        0.373_706_088_715_419_6,
        0.227_785_851_141_645_1,
        0.076_526_521_133_497_33,
    ];

    if r.abs() < 0.3 {
        (&W6, &X6)
    } else if r.abs() < 0.75 {
        (&W12, &X12)
    } else {
        (&W20, &X20)
    }
}

/// Upper bivariate normal probability `P(X > h, Y > k)` for standard normals
/// with correlation `r`.
pub fn bvn_upper(h: f64, k: f64, r: f64) -> f64 {
    if h == f64::INFINITY || k == f64::INFINITY {
        return 0.0;
    }
    if h == f64::NEG_INFINITY {
        return if k == f64::NEG_INFINITY {
            1.0
        } else {
            norm_cdf(-k)
        };
    }
    if k == f64::NEG_INFINITY {
        return norm_cdf(-h);
    }
    if r == 0.0 {
        return norm_cdf(-h) * norm_cdf(-k);
    }

    let tp = 2.0 * PI;
    let (w, x) = gauss_legendre(r);
    // Full rule on [0, 2]: each half abscissa a maps to 1 - a and 1 + a.
    let nodes = x
        .iter()
        .zip(w)
        .flat_map(|(&xi, &wi)| [(1.0 - xi, wi), (1.0 + xi, wi)]);

    let mut bvn;
    let mut k = k;
    let mut hk = h * k;

    if r.abs() < 0.925 {
        let hs = (h * h + k * k) / 2.0;
        let asr = r.asin() / 2.0;
        bvn = nodes
            .map(|(t, wi)| {
                let sn = (asr * t).sin();
                wi * ((sn * hk - hs) / (1.0 - sn * sn)).exp()
            })
            .sum::<f64>();
        bvn = bvn * asr / tp + norm_cdf(-h) * norm_cdf(-k);
    } else {
        if r < 0.0 {
            k = -k;
            hk = -hk;
        }
        bvn = 0.0;
        if r.abs() < 1.0 {
            let as_ = 1.0 - r * r;
            let mut a = as_.sqrt();
            let bs = (h - k) * (h - k);
            let asr = -(bs / as_ + hk) / 2.0;
            let c = (4.0 - hk) / 8.0;
            let d = (12.0 - hk) / 80.0;
            if asr > -100.0 {
                bvn = a
                    * asr.exp()
                    * (1.0 - c * (bs - as_) * (1.0 - d * bs) / 3.0 + c * d * as_ * as_);
            }
            if hk > -100.0 {
                let b = bs.sqrt();
                let sp = tp.sqrt() * norm_cdf(-b / a);
                bvn -= (-hk / 2.0).exp() * sp * b * (1.0 - c * bs * (1.0 - d * bs) / 3.0);
            }
            a /= 2.0;
            let sum: f64 = nodes
                .filter_map(|(t, wi)| {
                    let xs = (a * t) * (a * t);
                    let asr = -(bs / xs + hk) / 2.0;
                    if asr <= -100.0 {
                        return None;
                    }
                    let sp = 1.0 + c * xs * (1.0 + 5.0 * d * xs);
                    let rs = (1.0 - xs).sqrt();
                    let ep = (-(hk / 2.0) * xs / ((1.0 + rs) * (1.0 + rs))).exp() / rs;
                    Some(wi * asr.exp() * (sp - ep))
                })
                .sum();
            bvn = (a * sum - bvn) / tp;
        }
        if r > 0.0 {
            bvn += norm_cdf(-h.max(k));
        } else if h >= k {
            bvn = -bvn;
        } else {
            let l = if h < 0.0 {
                norm_cdf(k) - norm_cdf(h)
            } else {
                norm_cdf(-h) - norm_cdf(-k)
            };
            bvn = l - bvn;
        }
    }
    bvn.clamp(0.0, 1.0)
}

/// Bivariate normal CDF `P(X < h, Y < k)`.
pub fn bvn_cdf(h: f64, k: f64, r: f64) -> f64 {
    bvn_upper(-h, -k, r)
}

/// Probability that a standard bivariate normal with correlation `r` falls in
/// the rectangle `[a1, b1] x [a2, b2]`.
pub fn bvn_rectangle(a1: f64, b1: f64, a2: f64, b2: f64, r: f64) -> f64 {
    let p = bvn_cdf(b1, b2, r) - bvn_cdf(a1, b2, r) - bvn_cdf(b1, a2, r) + bvn_cdf(a1, a2, r);
    p.clamp(0.0, 1.0)
}
